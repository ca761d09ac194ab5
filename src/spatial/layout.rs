//! Ship layout files
//!
//! A layout bundles everything static about a map: named rooms, doors,
//! vents and the walls that cast shadow. It is loaded once per game and
//! split into the read-only catalogs the perception systems consume.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::Vec2;
use crate::spatial::rooms::{RoomCatalog, RoomSpec};
use crate::spatial::visibility::{ShadowOccluders, Wall};

/// A door on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: u32,
    pub position: Vec2,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

/// A vent entrance on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vent {
    pub id: u32,
    pub position: Vec2,
}

/// Doors and vents in map order
#[derive(Debug, Clone, Default)]
pub struct ObjectCatalog {
    pub doors: Vec<Door>,
    pub vents: Vec<Vent>,
}

/// On-disk layout format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipLayout {
    #[serde(default)]
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub vents: Vec<Vent>,
    #[serde(default)]
    pub walls: Vec<Wall>,
}

impl ShipLayout {
    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a layout from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn room_catalog(&self) -> RoomCatalog {
        RoomCatalog::from_specs(&self.rooms)
    }

    pub fn object_catalog(&self) -> ObjectCatalog {
        ObjectCatalog {
            doors: self.doors.clone(),
            vents: self.vents.clone(),
        }
    }

    pub fn occluders(&self) -> ShadowOccluders {
        ShadowOccluders::from_walls(self.walls.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::visibility::{OccluderLayer, VisibilityOracle};

    const LAYOUT: &str = r#"{
        "rooms": [
            {"name": "Cafeteria", "vertices": [[0, 0], [10, 0], [10, 10], [0, 10]]},
            {"name": "Upper Hallway", "corridor": true, "vertices": [[10, 4], [20, 4], [20, 6], [10, 6]]},
            {"name": "Broken", "vertices": [[0, 0]]}
        ],
        "doors": [{"id": 1, "position": [10, 5]}, {"id": 2, "position": [20, 5], "open": false}],
        "vents": [{"id": 7, "position": [3, 3]}],
        "walls": [
            {"from": [5, -1], "to": [5, 1]},
            {"from": [8, -1], "to": [8, 1], "layer": "collision"}
        ]
    }"#;

    #[test]
    fn test_layout_parses() {
        let layout = ShipLayout::from_json(LAYOUT).unwrap();
        assert_eq!(layout.rooms.len(), 3);
        assert_eq!(layout.doors.len(), 2);
        assert!(layout.doors[0].open);
        assert!(!layout.doors[1].open);
        assert_eq!(layout.walls[0].layer, OccluderLayer::Shadow);
        assert_eq!(layout.walls[1].layer, OccluderLayer::Collision);
    }

    #[test]
    fn test_layout_splits_into_catalogs() {
        let layout = ShipLayout::from_json(LAYOUT).unwrap();
        assert_eq!(layout.room_catalog().len(), 2);
        assert_eq!(layout.object_catalog().vents[0].id, 7);

        let occluders = layout.occluders();
        assert!(!occluders.is_visible(Vec2::new(4.0, 0.0), Vec2::new(6.0, 0.0)));
        assert!(occluders.is_visible(Vec2::new(7.0, 0.0), Vec2::new(9.0, 0.0)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ShipLayout::from_json("{\"rooms\": 3}").is_err());
    }
}
