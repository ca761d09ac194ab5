//! World interface consumed by the perception systems

pub mod snapshot;
pub mod view;

pub use snapshot::WorldSnapshot;
pub use view::{PlayerState, WorldView};
