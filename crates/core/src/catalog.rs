//! Entity catalog: static attributes and absolute-position preferences per entity kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::mapgen::{Bounds, Contents, Tile, TileOverrides};
use crate::types::{EntityKind, Pos};

/// Frame index of the 16px sprite-strip cell containing pixel `(x, y)`.
pub const fn sprite_frame_at(x: u16, y: u16) -> u16 {
    (x / 16) + (y / 16) * 16
}

pub mod frames {
    pub const GUARD_QUADRANTS: [&str; 4] = ["guard1", "guard2", "guard3", "guard4"];
    pub const TWIN_LEFT: &str = "left";
    pub const TWIN_RIGHT: &str = "right";
    pub const TWIN_ABOVE: &str = "above";
    pub const TWIN_BELOW: &str = "below";
    pub const TREASURE_XP1: &str = "xp1";
    pub const TREASURE_XP3: &str = "xp3";
    pub const TREASURE_XP5: &str = "xp5";
}

/// Preference for an absolute position on the floor, scored without looking at other
/// tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PositionalRule {
    Center { bonus: i64 },
    Corner { bonus: i64 },
    EdgeNotCorner { bonus: i64 },
    CloseToEdge { penalty: i64 },
    /// `guard1`..`guard4` want the top-left, top-right, bottom-right, bottom-left
    /// quadrant around the floor pivot.
    NamedQuadrant { bonus: i64 },
}

impl PositionalRule {
    pub fn score(self, pos: Pos, bounds: Bounds, name: &str) -> i64 {
        match self {
            Self::Center { bonus } => award(bounds.is_center(pos), bonus),
            Self::Corner { bonus } => award(bounds.is_corner(pos), bonus),
            Self::EdgeNotCorner { bonus } => {
                award(bounds.is_edge(pos) && !bounds.is_corner(pos), bonus)
            }
            Self::CloseToEdge { penalty } => award(bounds.is_close_to_edge(pos), -penalty),
            Self::NamedQuadrant { bonus } => {
                let pivot = bounds.pivot();
                let in_quadrant = match name {
                    "guard1" => pos.x < pivot.x && pos.y < pivot.y,
                    "guard2" => pos.x > pivot.x && pos.y < pivot.y,
                    "guard3" => pos.x > pivot.x && pos.y > pivot.y,
                    "guard4" => pos.x < pivot.x && pos.y > pivot.y,
                    _ => false,
                };
                award(in_quadrant, bonus)
            }
        }
    }
}

fn award(condition: bool, amount: i64) -> i64 {
    if condition { amount } else { 0 }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: EntityKind,
    pub display_name: String,
    pub sprite_frame: u16,
    #[serde(default)]
    pub is_monster: bool,
    #[serde(default)]
    pub default_level: i32,
    #[serde(default)]
    pub default_xp: i32,
    #[serde(default)]
    pub dead_frame: u16,
    #[serde(default)]
    pub positional_rule: Option<PositionalRule>,
    #[serde(default)]
    pub alt_frames: BTreeMap<String, u16>,
    /// What a fresh instance holds when the layer plan names no contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_contents: Option<Contents>,
}

impl CatalogEntry {
    fn item(kind: EntityKind, display_name: &str, sprite_frame: u16) -> Self {
        Self {
            kind,
            display_name: display_name.to_string(),
            sprite_frame,
            is_monster: false,
            default_level: 0,
            default_xp: 0,
            dead_frame: 0,
            positional_rule: None,
            alt_frames: BTreeMap::new(),
            default_contents: None,
        }
    }

    fn monster(
        kind: EntityKind,
        display_name: &str,
        sprite_frame: u16,
        level: i32,
        xp: i32,
    ) -> Self {
        Self {
            is_monster: true,
            default_level: level,
            default_xp: xp,
            ..Self::item(kind, display_name, sprite_frame)
        }
    }

    fn with_rule(mut self, rule: PositionalRule) -> Self {
        self.positional_rule = Some(rule);
        self
    }

    fn with_dead_frame(mut self, dead_frame: u16) -> Self {
        self.dead_frame = dead_frame;
        self
    }

    fn with_contents(mut self, kind: EntityKind, xp: i32) -> Self {
        self.default_contents = Some(Contents { kind, xp: Some(xp) });
        self
    }

    fn with_alt_frames(mut self, alt_frames: &[(&str, u16)]) -> Self {
        self.alt_frames =
            alt_frames.iter().map(|&(name, frame)| (name.to_string(), frame)).collect();
        self
    }

    pub fn alt_frame(&self, name: &str) -> Option<u16> {
        self.alt_frames.get(name).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<EntityKind, CatalogEntry>,
}

impl Catalog {
    pub fn build_default() -> Self {
        use CatalogEntry as E;
        use EntityKind as K;

        let guard = sprite_frame_at(200, 200);
        let gargoyle = sprite_frame_at(26, 210);
        let chest = sprite_frame_at(70, 360);
        let entries = vec![
            E::monster(K::Bat, "Bat", sprite_frame_at(134, 231), 2, 2),
            E::monster(K::BigSlime, "BigSlime", sprite_frame_at(120, 455), 8, 8),
            E::monster(K::DarkKnight, "DarkKnight", sprite_frame_at(200, 168), 5, 5),
            E::monster(K::Death, "Death", sprite_frame_at(130, 340), 9, 9),
            E::monster(K::Dragon, "Dragon", sprite_frame_at(200, 311), 13, 13)
                .with_dead_frame(sprite_frame_at(230, 310))
                .with_rule(PositionalRule::Center { bonus: 10_000 }),
            E::monster(K::DragonEgg, "DragonEgg", sprite_frame_at(0, 250), 0, 3)
                .with_dead_frame(sprite_frame_at(0, 250) + 1),
            E::monster(K::Eye, "Eye", sprite_frame_at(135, 167), 5, 5),
            E::monster(K::Fidel, "Fidel", sprite_frame_at(0, 408), 0, 0)
                .with_rule(PositionalRule::Corner { bonus: 9_000 }),
            E::monster(K::Gargoyle, "Gargoyle", gargoyle, 4, 4).with_alt_frames(&[
                (frames::TWIN_LEFT, gargoyle),
                (frames::TWIN_RIGHT, gargoyle + 1),
                (frames::TWIN_ABOVE, gargoyle + 2),
                (frames::TWIN_BELOW, gargoyle + 3),
            ]),
            E::monster(K::Gazer, "Gazer", sprite_frame_at(135, 180), 5, 5),
            E::monster(K::Giant, "Giant", sprite_frame_at(0, 450), 9, 9),
            E::monster(K::Gnome, "Gnome", sprite_frame_at(40, 408), 0, 9),
            E::monster(K::Guard, "Guard", guard, 7, 7)
                .with_rule(PositionalRule::NamedQuadrant { bonus: 2_500 })
                .with_alt_frames(&[
                    (frames::GUARD_QUADRANTS[0], guard),
                    (frames::GUARD_QUADRANTS[1], guard + 1),
                    (frames::GUARD_QUADRANTS[2], guard + 2),
                    (frames::GUARD_QUADRANTS[3], guard + 3),
                ]),
            E::monster(K::Mimic, "Mimic", chest, 11, 11),
            E::monster(K::Mine, "Mine", sprite_frame_at(150, 455), 100, 3)
                .with_dead_frame(sprite_frame_at(170, 455)),
            E::monster(K::MineKing, "MineKing", sprite_frame_at(250, 135), 10, 10)
                .with_rule(PositionalRule::Corner { bonus: 10_000 }),
            E::monster(K::Minotaur, "Minotaur", sprite_frame_at(200, 326), 6, 6),
            E::monster(K::Rat, "Rat", sprite_frame_at(90, 265), 1, 1),
            E::monster(K::RatKing, "RatKing", sprite_frame_at(70, 265), 5, 5),
            E::monster(K::Skeleton, "Skeleton", sprite_frame_at(70, 134), 3, 3),
            E::monster(K::Slime, "Slime", sprite_frame_at(86, 473), 5, 5),
            E::monster(K::Snake, "Snake", sprite_frame_at(250, 250), 7, 7),
            E::monster(K::Wizard, "Wizard", sprite_frame_at(72, 76), 1, 1)
                .with_rule(PositionalRule::EdgeNotCorner { bonus: 10_000 }),
            E::item(K::Chest, "Chest", chest).with_contents(K::Treasure, 5),
            E::item(K::Crown, "Crown", 142),
            E::item(K::Medikit, "Medikit", 22),
            E::item(K::Orb, "Orb", 23).with_rule(PositionalRule::CloseToEdge { penalty: 10_000 }),
            E::item(K::Treasure, "Treasure", 24).with_alt_frames(&[
                (frames::TREASURE_XP1, 30),
                (frames::TREASURE_XP3, 31),
                (frames::TREASURE_XP5, 24),
            ]),
            E::item(K::Wall, "Wall", 11),
            E::item(K::Decoration, "Decoration", 0),
            E::item(K::SpellDisarm, "SpellDisarm", 35),
            E::item(K::SpellMakeOrb, "SpellMakeOrb", 10),
            E::item(K::SpellRevealRats, "SpellRevealRats", 29),
            E::item(K::SpellRevealSlimes, "SpellRevealSlimes", 19),
        ];
        Self { entries: entries.into_iter().map(|entry| (entry.kind, entry)).collect() }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, GenerationError> {
        let mut by_kind = BTreeMap::new();
        for entry in entries {
            let kind = entry.kind;
            if by_kind.insert(kind, entry).is_some() {
                return Err(GenerationError::DuplicateEntry(kind));
            }
        }
        Ok(Self { entries: by_kind })
    }

    /// Parses a JSON array of catalog entries.
    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn to_json_string(&self) -> Result<String, GenerationError> {
        let entries: Vec<&CatalogEntry> = self.entries.values().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    pub fn entry(&self, kind: EntityKind) -> Result<&CatalogEntry, GenerationError> {
        self.entries.get(&kind).ok_or(GenerationError::UnknownEntity(kind))
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.values()
    }

    /// Builds a fresh, unplaced tile for `kind` with `overrides` applied. Contents come
    /// from the overrides, else from the entry's defaults, and never nest further.
    pub fn instantiate(
        &self,
        kind: EntityKind,
        overrides: &TileOverrides,
    ) -> Result<Tile, GenerationError> {
        let entry = self.entry(kind)?;
        let mut tile = Self::bare_tile(entry, overrides);
        if let Some(contents) = overrides.contains.as_ref().or(entry.default_contents.as_ref()) {
            let inner = TileOverrides { xp: contents.xp, ..TileOverrides::default() };
            tile.contains = Some(Box::new(Self::bare_tile(self.entry(contents.kind)?, &inner)));
        }
        Ok(tile)
    }

    fn bare_tile(entry: &CatalogEntry, overrides: &TileOverrides) -> Tile {
        let kind = entry.kind;
        let mut tile = Tile {
            kind,
            name: entry.display_name.to_lowercase(),
            level: entry.default_level,
            xp: entry.default_xp,
            is_monster: entry.is_monster,
            ..Tile::empty(Pos::default())
        };
        tile.presentation.sprite_frame = entry.sprite_frame;
        tile.presentation.dead_frame = entry.dead_frame;

        if let Some(name) = &overrides.name {
            tile.name = name.clone();
        }
        if let Some(level) = overrides.level {
            tile.level = level;
        }
        if let Some(xp) = overrides.xp {
            tile.xp = xp;
        }
        if let Some(revealed) = overrides.revealed {
            tile.presentation.revealed = revealed;
        }
        tile
    }

    pub fn positional_score(&self, tile: &Tile, bounds: Bounds) -> i64 {
        self.entries
            .get(&tile.kind)
            .and_then(|entry| entry.positional_rule)
            .map_or(0, |rule| rule.score(tile.pos, bounds, &tile.name))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::build_default()
    }
}
