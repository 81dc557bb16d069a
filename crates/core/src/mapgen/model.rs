//! Public data model for a generated floor.

use crate::types::{EntityKind, Pos};

use super::grid::Grid;
use super::tile::Tile;

/// Per-layer bookkeeping kept alongside the finished grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSummary {
    pub name: String,
    pub requested: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub swaps: usize,
    pub score: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub floor_index: u8,
    pub grid: Grid,
    pub chest_locations: Vec<Pos>,
    pub wall_locations: Vec<Pos>,
    pub layers: Vec<LayerSummary>,
    pub score: i64,
}

impl GeneratedFloor {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&Tile> {
        self.grid.get(pos)
    }

    /// Requests dropped across all layers because the floor ran out of cells.
    pub fn unplaced(&self) -> usize {
        self.layers.iter().map(|layer| layer.unplaced).sum()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.grid.find_all(kind).len()
    }

    /// Stable byte encoding of everything that identifies the layout.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.push(self.floor_index);
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            encode_tile(&mut bytes, tile);
            match &tile.contains {
                Some(inner) => {
                    bytes.push(1);
                    encode_tile(&mut bytes, inner);
                }
                None => bytes.push(0),
            }
        }

        for list in [&self.chest_locations, &self.wall_locations] {
            bytes.extend((list.len() as u32).to_le_bytes());
            for pos in list {
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
        }
        bytes.extend(self.score.to_le_bytes());
        bytes
    }

    /// One row of two-letter glyphs per grid row, empty cells as `..`.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() * 3 + 1));
        for y in 0..self.height() {
            let row: Vec<&str> = (0..self.width())
                .map(|x| {
                    self.grid
                        .get(Pos::new(x as i32, y as i32))
                        .map_or("??", |tile| tile.kind.glyph())
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

fn encode_tile(bytes: &mut Vec<u8>, tile: &Tile) {
    bytes.push(tile.kind as u8);
    bytes.push(u8::from(tile.fixed));
    bytes.extend((tile.name.len() as u32).to_le_bytes());
    bytes.extend(tile.name.as_bytes());
    bytes.extend(tile.level.to_le_bytes());
    bytes.extend(tile.xp.to_le_bytes());
    let presentation = &tile.presentation;
    bytes.extend(presentation.sprite_frame.to_le_bytes());
    bytes.extend(presentation.wall_hp.to_le_bytes());
    bytes.push(u8::from(presentation.revealed));
    match presentation.chest_location {
        Some(chest) => {
            bytes.push(1);
            bytes.extend(chest.y.to_le_bytes());
            bytes.extend(chest.x.to_le_bytes());
        }
        None => bytes.push(0),
    }
}
