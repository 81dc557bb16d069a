//! Presentation annotations derived from a finished layout.
//!
//! Nothing here moves a tile. Sprite frames, wall hit points and the minotaur's chest
//! are written into each tile's presentation payload only.

use log::debug;

use crate::catalog::{Catalog, frames};
use crate::config::GenerationConfig;
use crate::types::{EntityKind, Pos};

use super::grid::Grid;
use super::tile::{Presentation, Tile};

/// Lookup lists handed to the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorIndex {
    pub chest_locations: Vec<Pos>,
    pub wall_locations: Vec<Pos>,
}

enum Annotation {
    Frame(u16),
    ChestLocation(Pos),
}

pub fn finalize(grid: &mut Grid, catalog: &Catalog, config: &GenerationConfig) -> FloorIndex {
    let index = FloorIndex {
        chest_locations: positions_of(grid, EntityKind::Chest),
        wall_locations: positions_of(grid, EntityKind::Wall),
    };

    let mut annotations = Vec::new();
    for tile in grid.occupied_tiles() {
        let Ok(entry) = catalog.entry(tile.kind) else {
            continue;
        };
        match tile.kind {
            EntityKind::Guard => {
                if let Some(frame) = entry.alt_frame(&tile.name) {
                    annotations.push((tile.pos, Annotation::Frame(frame)));
                }
            }
            EntityKind::Gargoyle => {
                let facing = twin_facing(grid, tile);
                if let Some(frame) = facing.and_then(|facing| entry.alt_frame(facing)) {
                    annotations.push((tile.pos, Annotation::Frame(frame)));
                }
            }
            EntityKind::Minotaur => {
                let radius = config.weights.minotaur_radius;
                if let Some(&chest) =
                    index.chest_locations.iter().find(|chest| tile.pos.within(**chest, radius))
                {
                    annotations.push((tile.pos, Annotation::ChestLocation(chest)));
                }
            }
            EntityKind::Treasure => {
                if let Some(frame) = treasure_frame(catalog, tile.xp) {
                    annotations.push((tile.pos, Annotation::Frame(frame)));
                }
            }
            _ => {}
        }
    }

    for (pos, annotation) in annotations {
        if let Some(presentation) = grid.presentation_mut(pos) {
            match annotation {
                Annotation::Frame(frame) => presentation.sprite_frame = frame,
                Annotation::ChestLocation(chest) => presentation.chest_location = Some(chest),
            }
        }
    }

    let positions: Vec<Pos> = grid.populated_positions().collect();
    for pos in positions {
        if let Some(contents) = grid.contents_mut(pos)
            && contents.kind == EntityKind::Treasure
            && let Some(frame) = treasure_frame(catalog, contents.xp)
        {
            contents.presentation.sprite_frame = frame;
        }
    }

    if !config.wall_hp_cycle.is_empty() {
        for (wall_index, &pos) in index.wall_locations.iter().enumerate() {
            let hp = config.wall_hp_cycle[wall_index % config.wall_hp_cycle.len()];
            if let Some(presentation) = grid.presentation_mut(pos) {
                set_wall_hp(presentation, hp);
            }
        }
    }

    debug!(
        "finalized floor: {} chests, {} walls",
        index.chest_locations.len(),
        index.wall_locations.len()
    );
    index
}

fn positions_of(grid: &Grid, kind: EntityKind) -> Vec<Pos> {
    grid.find_all(kind).into_iter().map(|tile| tile.pos).collect()
}

/// Which side the same-named twin sits on; horizontal offsets win over vertical ones.
fn twin_facing(grid: &Grid, tile: &Tile) -> Option<&'static str> {
    let twin = grid
        .find_all(tile.kind)
        .into_iter()
        .find(|other| other.pos != tile.pos && other.name == tile.name)?;
    let facing = if twin.pos.x < tile.pos.x {
        frames::TWIN_LEFT
    } else if twin.pos.x > tile.pos.x {
        frames::TWIN_RIGHT
    } else if twin.pos.y < tile.pos.y {
        frames::TWIN_ABOVE
    } else {
        frames::TWIN_BELOW
    };
    Some(facing)
}

fn treasure_frame(catalog: &Catalog, xp: i32) -> Option<u16> {
    let key = match xp {
        1 => frames::TREASURE_XP1,
        3 => frames::TREASURE_XP3,
        5 => frames::TREASURE_XP5,
        _ => return None,
    };
    catalog.entry(EntityKind::Treasure).ok()?.alt_frame(key)
}

fn set_wall_hp(presentation: &mut Presentation, hp: i32) {
    presentation.wall_hp = hp;
    presentation.wall_max_hp = hp;
}
