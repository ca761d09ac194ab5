//! Static map geometry: rooms, walls, doors and vents

pub mod layout;
pub mod location;
pub mod rooms;
pub mod visibility;

pub use layout::{Door, ObjectCatalog, ShipLayout, Vent};
pub use location::LocationResolver;
pub use rooms::{Room, RoomCatalog, RoomSpec};
pub use visibility::{OccluderLayer, ShadowOccluders, VisibilityOracle, Wall};
