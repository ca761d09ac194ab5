//! Line-of-sight queries
//!
//! The agent can only see what a ray from its own position reaches without
//! crossing a shadow-casting wall. Geometry is owned by the host; this
//! module only defines the query seam and a wall-list implementation.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line};
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// Answers whether an occluder blocks the segment between two points
pub trait VisibilityOracle {
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool;
}

impl<F> VisibilityOracle for F
where
    F: Fn(Vec2, Vec2) -> bool,
{
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool {
        self(from, to)
    }
}

/// Physics layer a wall belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccluderLayer {
    /// Casts shadow, blocks sight
    #[default]
    Shadow,
    /// Blocks movement only
    Collision,
}

/// A straight wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub from: Vec2,
    pub to: Vec2,
    #[serde(default)]
    pub layer: OccluderLayer,
}

impl Wall {
    pub fn shadow(from: Vec2, to: Vec2) -> Self {
        Self { from, to, layer: OccluderLayer::Shadow }
    }

    pub fn collision(from: Vec2, to: Vec2) -> Self {
        Self { from, to, layer: OccluderLayer::Collision }
    }

    fn line(&self) -> Line<f64> {
        segment(self.from, self.to)
    }
}

/// Visibility oracle backed by a flat list of walls
#[derive(Debug, Clone, Default)]
pub struct ShadowOccluders {
    walls: Vec<Wall>,
}

impl ShadowOccluders {
    pub fn new() -> Self {
        Self { walls: Vec::new() }
    }

    pub fn from_walls(walls: Vec<Wall>) -> Self {
        Self { walls }
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Walls that take part in sight queries
    pub fn shadow_walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls
            .iter()
            .filter(|w| w.layer == OccluderLayer::Shadow)
    }
}

impl VisibilityOracle for ShadowOccluders {
    fn is_visible(&self, from: Vec2, to: Vec2) -> bool {
        if from.distance_squared(to) <= f32::EPSILON {
            return true;
        }

        let ray = segment(from, to);
        !self.shadow_walls().any(|wall| blocks(wall.line(), ray))
    }
}

/// Does `wall` cross the open segment `ray`, endpoints excluded
fn blocks(wall: Line<f64>, ray: Line<f64>) -> bool {
    let is_endpoint = |c: Coord<f64>| c == ray.start || c == ray.end;
    match line_intersection(wall, ray) {
        None => false,
        Some(LineIntersection::SinglePoint { intersection, .. }) => !is_endpoint(intersection),
        Some(LineIntersection::Collinear { intersection }) => {
            !(intersection.start == intersection.end && is_endpoint(intersection.start))
        }
    }
}

fn segment(from: Vec2, to: Vec2) -> Line<f64> {
    Line::new(
        (from.x as f64, from.y as f64),
        (to.x as f64, to.y as f64),
    )
}
