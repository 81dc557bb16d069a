use dragonsweep_core::{EntityKind, GeneratedFloor, Pos, generate_floor};

fn standard_floor(seed: u64) -> GeneratedFloor {
    generate_floor(seed, 1).expect("standard floor generates")
}

#[test]
fn test_smoke_standard_floor_is_complete() {
    let floor = standard_floor(12_345);
    assert_eq!((floor.width(), floor.height()), (13, 10));
    assert_eq!(floor.unplaced(), 0);
    assert_eq!(floor.grid.populated_count(), 103);
    assert!(floor.grid.is_consistent());

    for (kind, expected) in [
        (EntityKind::Dragon, 1),
        (EntityKind::Wizard, 1),
        (EntityKind::BigSlime, 5),
        (EntityKind::Giant, 2),
        (EntityKind::Guard, 4),
        (EntityKind::Gargoyle, 8),
        (EntityKind::Mine, 9),
        (EntityKind::Chest, 5),
        (EntityKind::Rat, 13),
        (EntityKind::Bat, 12),
    ] {
        assert_eq!(floor.count(kind), expected, "unexpected {kind:?} count");
    }
}

#[test]
fn test_smoke_location_lists_match_the_grid() {
    let floor = standard_floor(777);
    for pos in &floor.chest_locations {
        assert_eq!(floor.tile_at(*pos).map(|tile| tile.kind), Some(EntityKind::Chest));
    }
    for pos in &floor.wall_locations {
        let wall = floor.tile_at(*pos).expect("wall position in bounds");
        assert_eq!(wall.kind, EntityKind::Wall);
        assert!((1..=3).contains(&wall.presentation.wall_hp));
        let contents = wall.contains.as_ref().map(|inner| (inner.kind, inner.xp));
        assert_eq!(contents, Some((EntityKind::Treasure, 1)));
    }
    let chest_contents: Vec<(EntityKind, i32)> = floor
        .chest_locations
        .iter()
        .filter_map(|pos| floor.tile_at(*pos)?.contains.as_ref())
        .map(|inner| (inner.kind, inner.xp))
        .collect();
    assert_eq!(chest_contents.len(), 5);
    assert_eq!(chest_contents.iter().filter(|c| **c == (EntityKind::Treasure, 5)).count(), 3);
    assert_eq!(chest_contents.iter().filter(|c| c.0 == EntityKind::Medikit).count(), 2);
    assert_eq!(floor.wall_locations.len(), 6);
}

#[test]
fn test_smoke_text_render_has_one_line_per_row() {
    let floor = standard_floor(5);
    let text = floor.render_text();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|row| row.split(' ').count() == 13));
    assert_eq!(text.matches("..").count(), 130 - 103);
    assert!(floor.tile_at(Pos::new(13, 0)).is_none());
}
