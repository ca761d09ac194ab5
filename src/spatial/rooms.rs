//! Static room catalog
//!
//! Rooms are the named polygons of a ship map, kept in the order the map
//! declares them. Corridors are rooms too, but never named on their own.

use geo::{Coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Room entry as written in a layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Localized display name
    pub name: String,
    #[serde(default)]
    pub corridor: bool,
    pub vertices: Vec<[f32; 2]>,
}

/// Why a room entry could not be turned into a polygon
#[derive(Debug, Clone, PartialEq)]
pub enum RoomDefect {
    InsufficientVertices { count: usize, minimum: usize },
    NonFiniteVertex { vertex: [f32; 2] },
}

/// A named area of the ship
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub is_corridor: bool,
    pub polygon: Polygon<f64>,
}

impl Room {
    /// Build a room from raw vertices, closing the ring
    pub fn from_vertices(
        name: impl Into<String>,
        is_corridor: bool,
        vertices: &[[f32; 2]],
    ) -> Result<Self, RoomDefect> {
        if vertices.len() < 3 {
            return Err(RoomDefect::InsufficientVertices {
                count: vertices.len(),
                minimum: 3,
            });
        }

        if let Some(bad) = vertices.iter().find(|[x, y]| !x.is_finite() || !y.is_finite()) {
            return Err(RoomDefect::NonFiniteVertex { vertex: *bad });
        }

        let coords: Vec<Coord<f64>> = vertices
            .iter()
            .map(|[x, y]| Coord { x: *x as f64, y: *y as f64 })
            .collect();

        Ok(Self {
            name: name.into(),
            is_corridor,
            // Polygon::new closes the ring
            polygon: Polygon::new(LineString::from(coords), vec![]),
        })
    }

    /// Axis-aligned rectangle room, mostly for tests and quick layouts
    pub fn rect(name: impl Into<String>, is_corridor: bool, min: [f32; 2], max: [f32; 2]) -> Self {
        let rect = Rect::new(
            Coord { x: min[0] as f64, y: min[1] as f64 },
            Coord { x: max[0] as f64, y: max[1] as f64 },
        );
        Self {
            name: name.into(),
            is_corridor,
            polygon: rect.to_polygon(),
        }
    }
}

/// Ordered, read-only list of rooms
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Build from layout entries, skipping any that are not usable polygons
    pub fn from_specs(specs: &[RoomSpec]) -> Self {
        let rooms = specs
            .iter()
            .filter_map(|spec| {
                match Room::from_vertices(spec.name.clone(), spec.corridor, &spec.vertices) {
                    Ok(room) => Some(room),
                    Err(defect) => {
                        tracing::warn!("Skipping room '{}': {:?}", spec.name, defect);
                        None
                    }
                }
            })
            .collect();
        Self { rooms }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
