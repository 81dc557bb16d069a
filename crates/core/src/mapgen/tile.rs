//! Tile values placed on a floor grid and the per-instance overrides the layer plan applies.

use serde::{Deserialize, Serialize};

use crate::types::{EntityKind, Pos};

pub const EMPTY_TILE_NAME: &str = "none";
const EMPTY_SPRITE_FRAME: u16 = 1;

/// Fields only the presentation layer reads. Generation carries them along untouched
/// until the finalize pass annotates them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Presentation {
    pub sprite_frame: u16,
    pub dead_frame: u16,
    pub revealed: bool,
    pub wall_hp: i32,
    pub wall_max_hp: i32,
    pub chest_location: Option<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: EntityKind,
    pub pos: Pos,
    pub fixed: bool,
    pub name: String,
    pub level: i32,
    pub xp: i32,
    pub is_monster: bool,
    /// Owned payload revealed when this tile is cleared (a chest's treasure, a wall's loot).
    /// Never nested more than one level deep.
    pub contains: Option<Box<Tile>>,
    pub presentation: Presentation,
}

impl Tile {
    pub fn empty(pos: Pos) -> Self {
        Self {
            kind: EntityKind::Empty,
            pos,
            fixed: false,
            name: EMPTY_TILE_NAME.to_string(),
            level: 0,
            xp: 0,
            is_monster: false,
            contains: None,
            presentation: Presentation {
                sprite_frame: EMPTY_SPRITE_FRAME,
                ..Presentation::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn is_near(&self, other: &Tile, max_distance: f64) -> bool {
        self.pos.within(other.pos, max_distance)
    }
}

/// Payload to instantiate inside a tile's `contains` slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    pub kind: EntityKind,
    #[serde(default)]
    pub xp: Option<i32>,
}

/// Per-instance attribute overrides applied on top of a catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileOverrides {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub xp: Option<i32>,
    pub revealed: Option<bool>,
    pub contains: Option<Contents>,
}

impl TileOverrides {
    pub fn named(name: &str) -> Self {
        Self { name: Some(name.to_string()), ..Self::default() }
    }

    pub fn containing(kind: EntityKind, xp: Option<i32>) -> Self {
        Self { contains: Some(Contents { kind, xp }), ..Self::default() }
    }
}
