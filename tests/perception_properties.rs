//! Property tests for location resolution, round statistics and percentages

use crew_sight::core::{PlayerId, Vec2};
use crew_sight::perception::{Percentage, PlayerPerceptionStore, Sighting};
use crew_sight::spatial::{LocationResolver, Room, RoomCatalog};
use proptest::prelude::*;

fn mirrored_rooms(gap: f32, width: f32, half_height: f32, left_first: bool) -> RoomCatalog {
    let left = Room::rect("Left", false, [-gap - width, -half_height], [-gap, half_height]);
    let right = Room::rect("Right", false, [gap, -half_height], [gap + width, half_height]);
    if left_first {
        RoomCatalog::new(vec![left, right])
    } else {
        RoomCatalog::new(vec![right, left])
    }
}

#[test]
fn test_corridor_precedence() {
    let resolver = LocationResolver::ship(
        RoomCatalog::new(vec![
            Room::rect("Lower Hallway", true, [0.0, 0.0], [20.0, 2.0]),
            Room::rect("Storage", false, [20.0, -5.0], [30.0, 5.0]),
        ]),
        "the lobby",
    );
    assert_eq!(resolver.resolve(Vec2::new(18.0, 1.0)), "a corridor near Storage");
}

proptest! {
    #[test]
    fn prop_equal_distance_goes_to_first_room(
        gap in 1u8..40,
        width in 1u8..20,
        half_height in 2u8..20,
        y_offset in 0u8..100,
        left_first in any::<bool>(),
    ) {
        let half_height = half_height as f32;
        let y = (y_offset as f32 / 100.0) * half_height;
        let resolver = LocationResolver::ship(
            mirrored_rooms(gap as f32, width as f32, half_height, left_first),
            "the lobby",
        );

        let expected = if left_first { "outside near Left" } else { "outside near Right" };
        prop_assert_eq!(resolver.resolve(Vec2::new(0.0, y)), expected);
    }

    #[test]
    fn prop_point_inside_room_names_it(x in 0.0f32..10.0, y in 0.0f32..10.0) {
        let resolver = LocationResolver::ship(
            RoomCatalog::new(vec![
                Room::rect("Hallway", true, [-5.0, -5.0], [15.0, 15.0]),
                Room::rect("Admin", false, [0.0, 0.0], [10.0, 10.0]),
            ]),
            "the lobby",
        );
        prop_assert_eq!(resolver.resolve(Vec2::new(x, y)), "Admin");
    }

    #[test]
    fn prop_round_reset_keeps_game_time(
        deltas in proptest::collection::vec((0u8..4, 0.01f32..1.0), 1..40),
        dead in 1u8..4,
    ) {
        let agent = PlayerId(0);
        let mut store = PlayerPerceptionStore::new();
        store.start_tracking(&[agent, PlayerId(1), PlayerId(2), PlayerId(3)]);

        let mut now = 0.0;
        for (id, delta) in &deltas {
            now += delta;
            store.observe(PlayerId(*id), Sighting { location: "Admin".into(), now, delta: *delta });
        }
        store.mark_dead(PlayerId(dead), "Admin".into(), now, Vec::new);

        let before: Vec<_> = (0..4u8).map(|i| store.last_seen(PlayerId(i)).unwrap().clone()).collect();
        store.reset_round_statistics(agent);

        for i in 0..4u8 {
            let after = store.last_seen(PlayerId(i)).unwrap();
            let prior = &before[i as usize];
            prop_assert_eq!(after.game_time_visible, prior.game_time_visible);
            if i == 0 || after.is_dead || !after.has_been_seen() {
                prop_assert_eq!(after.round_time_visible, prior.round_time_visible);
            } else {
                prop_assert_eq!(after.round_time_visible, 0.0);
            }
        }
    }

    #[test]
    fn prop_percentage_never_divides_by_zero(part in 0.0f32..1000.0, whole in -10.0f32..1000.0) {
        match Percentage::of(part, whole) {
            Percentage::Known(value) => {
                prop_assert!(whole > 0.0);
                prop_assert!(value >= 0.0);
            }
            Percentage::Unknown => prop_assert!(whole <= 0.0),
        }
    }
}
