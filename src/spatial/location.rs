//! Place names for world positions
//!
//! Resolution scans the room catalog in order. A proper room containing the
//! point wins immediately; corridors only colour the answer ("a corridor
//! near ...") while the scan keeps looking for the nearest proper room.

use geo::{EuclideanDistance, Intersects, Point};

use crate::core::types::Vec2;
use crate::spatial::rooms::{Room, RoomCatalog};

pub const CORRIDOR_PREFIX: &str = "a corridor near ";
pub const OUTSIDE_PREFIX: &str = "outside near ";

/// Maps positions to human-readable place names
#[derive(Debug, Clone)]
pub struct LocationResolver {
    catalog: Option<RoomCatalog>,
    lobby_label: String,
}

impl LocationResolver {
    /// Resolver with no ship loaded; every position is the lobby
    pub fn lobby(label: impl Into<String>) -> Self {
        Self {
            catalog: None,
            lobby_label: label.into(),
        }
    }

    /// Resolver for an active ship
    pub fn ship(catalog: RoomCatalog, lobby_label: impl Into<String>) -> Self {
        Self {
            catalog: Some(catalog),
            lobby_label: lobby_label.into(),
        }
    }

    pub fn catalog(&self) -> Option<&RoomCatalog> {
        self.catalog.as_ref()
    }

    /// Name the place containing or nearest to `position`
    ///
    /// Returns an empty string when the catalog has no proper room at all.
    pub fn resolve(&self, position: Vec2) -> String {
        let Some(catalog) = &self.catalog else {
            return self.lobby_label.clone();
        };

        let point = Point::new(position.x as f64, position.y as f64);
        let mut prefix = OUTSIDE_PREFIX;
        let mut closest: Option<(&Room, f64)> = None;

        for room in catalog.iter() {
            if room.polygon.intersects(&point) {
                if room.is_corridor {
                    prefix = CORRIDOR_PREFIX;
                    continue;
                }
                return room.name.clone();
            }

            if room.is_corridor {
                continue;
            }

            let distance = point.euclidean_distance(&room.polygon);
            // Strict comparison: earlier rooms win ties
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((room, distance));
            }
        }

        match closest {
            Some((room, _)) => format!("{}{}", prefix, room.name),
            None => String::new(),
        }
    }
}
