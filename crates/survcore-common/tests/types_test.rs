//! Serialization tests for shared types.

use survcore_common::{BlockPos, Position, TeleportDirection};

#[test]
fn position_round_trips_through_yaml() {
    let pos = Position {
        world: "world_nether".to_string(),
        x: -120.5,
        y: 64.0,
        z: 988.25,
        yaw: 90.0,
        pitch: -10.0,
    };

    let yaml = serde_yaml::to_string(&pos).unwrap();
    let back: Position = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, pos);
}

#[test]
fn direction_round_trips_through_yaml() {
    for dir in [TeleportDirection::ToTarget, TeleportDirection::ToRequester] {
        let yaml = serde_yaml::to_string(&dir).unwrap();
        let back: TeleportDirection = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, dir);
    }
}

#[test]
fn block_pos_is_hashable_map_key() {
    let mut seen = std::collections::HashSet::new();
    seen.insert(BlockPos { x: 1, y: 2, z: 3 });
    assert!(seen.contains(&BlockPos { x: 1, y: 2, z: 3 }));
    assert!(!seen.contains(&BlockPos { x: 1, y: 2, z: 4 }));
}
