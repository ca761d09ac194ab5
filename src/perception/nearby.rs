//! Doors and vents closest to the agent
//!
//! Closeness is measured by walking distance, which the host's pathfinder
//! provides. The frame is rebuilt from scratch on every recording.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::types::Vec2;
use crate::spatial::layout::ObjectCatalog;

/// Walking distance between two points
pub trait PathLength {
    fn path_length(&self, from: Vec2, to: Vec2) -> f32;
}

impl<F> PathLength for F
where
    F: Fn(Vec2, Vec2) -> f32,
{
    fn path_length(&self, from: Vec2, to: Vec2) -> f32 {
        self(from, to)
    }
}

/// Euclidean fallback when no pathfinder is available
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl PathLength for StraightLine {
    fn path_length(&self, from: Vec2, to: Vec2) -> f32 {
        from.distance(to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoorData {
    pub id: u32,
    pub position: Vec2,
    pub open: bool,
    pub path_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VentData {
    pub id: u32,
    pub position: Vec2,
    pub path_distance: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapFrame {
    pub nearby_doors: Vec<DoorData>,
    pub nearby_vents: Vec<VentData>,
}

#[derive(Debug, Clone, Default)]
pub struct NearbyObjectRecorder {
    catalog: ObjectCatalog,
    frame: MapFrame,
}

impl NearbyObjectRecorder {
    pub fn new(catalog: ObjectCatalog) -> Self {
        Self {
            catalog,
            frame: MapFrame::default(),
        }
    }

    pub fn frame(&self) -> &MapFrame {
        &self.frame
    }

    /// Keep the `count` closest doors and vents, nearest first
    pub fn record(&mut self, agent: Vec2, paths: &impl PathLength, count: usize) {
        let mut doors: Vec<DoorData> = self
            .catalog
            .doors
            .iter()
            .map(|door| DoorData {
                id: door.id,
                position: door.position,
                open: door.open,
                path_distance: paths.path_length(agent, door.position),
            })
            .collect();
        doors.sort_by_key(|d| OrderedFloat(d.path_distance));
        doors.truncate(count);

        let mut vents: Vec<VentData> = self
            .catalog
            .vents
            .iter()
            .map(|vent| VentData {
                id: vent.id,
                position: vent.position,
                path_distance: paths.path_length(agent, vent.position),
            })
            .collect();
        vents.sort_by_key(|v| OrderedFloat(v.path_distance));
        vents.truncate(count);

        self.frame = MapFrame {
            nearby_doors: doors,
            nearby_vents: vents,
        };
    }

    pub fn clear(&mut self) {
        self.frame = MapFrame::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::layout::{Door, Vent};

    fn catalog() -> ObjectCatalog {
        ObjectCatalog {
            doors: (1..=5)
                .map(|i| Door {
                    id: i,
                    position: Vec2::new(i as f32 * 2.0, 0.0),
                    open: i % 2 == 0,
                })
                .collect(),
            vents: vec![
                Vent { id: 10, position: Vec2::new(-1.0, 0.0) },
                Vent { id: 11, position: Vec2::new(1.0, 0.0) },
            ],
        }
    }

    #[test]
    fn test_three_closest_doors_in_order() {
        let mut recorder = NearbyObjectRecorder::new(catalog());
        recorder.record(Vec2::new(7.0, 0.0), &StraightLine, 3);

        let ids: Vec<_> = recorder.frame().nearby_doors.iter().map(|d| d.id).collect();
        // Doors at 6 and 8 tie at distance 1: catalog order keeps 3 first
        assert_eq!(ids, vec![3, 4, 2]);
        assert!((recorder.frame().nearby_doors[0].path_distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fewer_objects_than_count() {
        let mut recorder = NearbyObjectRecorder::new(catalog());
        recorder.record(Vec2::ZERO, &StraightLine, 3);
        let ids: Vec<_> = recorder.frame().nearby_vents.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn test_custom_path_lengths() {
        let mut recorder = NearbyObjectRecorder::new(catalog());
        // A pathfinder that makes everything right of x=5 unreachable
        let paths = |from: Vec2, to: Vec2| {
            if to.x > 5.0 {
                f32::INFINITY
            } else {
                from.distance(to)
            }
        };
        recorder.record(Vec2::new(9.0, 0.0), &paths, 2);
        let ids: Vec<_> = recorder.frame().nearby_doors.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1]);

        recorder.clear();
        assert!(recorder.frame().nearby_doors.is_empty());
    }
}
