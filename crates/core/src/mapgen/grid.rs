//! Floor grid storage, the populated-cell index, and spatial queries over placed tiles.

use std::collections::BTreeSet;
use std::mem;
use std::ops::RangeInclusive;

use crate::types::{EntityKind, Pos};

use super::tile::{Presentation, Tile};

/// Floor dimensions plus the geometric classifications positional rules depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn index(self, pos: Pos) -> Option<usize> {
        self.contains(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }

    pub fn pos_at(self, index: usize) -> Pos {
        Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }

    pub fn cell_count(self) -> usize {
        self.width * self.height
    }

    pub fn is_edge(self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == self.width as i32 - 1
            || pos.y == self.height as i32 - 1
    }

    pub fn is_corner(self, pos: Pos) -> bool {
        (pos.x == 0 || pos.x == self.width as i32 - 1)
            && (pos.y == 0 || pos.y == self.height as i32 - 1)
    }

    /// Single centre cell; odd and even dimensions both truncate.
    pub fn is_center(self, pos: Pos) -> bool {
        pos.x == (self.width / 2) as i32 && pos.y == (self.height / 2) as i32
    }

    /// Within two cells of any border.
    pub fn is_close_to_edge(self, pos: Pos) -> bool {
        pos.x < 2
            || pos.y < 2
            || pos.x >= self.width as i32 - 2
            || pos.y >= self.height as i32 - 2
    }

    /// Cell the quadrant and left/right rules split around.
    pub fn pivot(self) -> Pos {
        Pos {
            y: (self.height.saturating_sub(1) / 2) as i32,
            x: (self.width.saturating_sub(1) / 2) as i32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    bounds: Bounds,
    tiles: Vec<Tile>,
    populated: BTreeSet<Pos>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let bounds = Bounds { width, height };
        let tiles =
            (0..bounds.cell_count()).map(|index| Tile::empty(bounds.pos_at(index))).collect();
        Self { bounds, tiles, populated: BTreeSet::new() }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> usize {
        self.bounds.width
    }

    pub fn height(&self) -> usize {
        self.bounds.height
    }

    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        self.bounds.index(pos).map(|index| &self.tiles[index])
    }

    /// Replaces the tile at `pos`, rewriting its coordinate and the populated index.
    ///
    /// # Panics
    ///
    /// Panics when `pos` lies outside the grid; callers validate bounds first.
    pub fn set(&mut self, pos: Pos, mut tile: Tile) -> Tile {
        let index = self.checked_index(pos);
        tile.pos = pos;
        if tile.is_empty() {
            self.populated.remove(&pos);
        } else {
            self.populated.insert(pos);
        }
        mem::replace(&mut self.tiles[index], tile)
    }

    /// Exchanges the tiles stored at `a` and `b`, keeping each tile's coordinate in step.
    ///
    /// # Panics
    ///
    /// Panics when either position lies outside the grid.
    pub fn swap(&mut self, a: Pos, b: Pos) {
        let index_a = self.checked_index(a);
        let index_b = self.checked_index(b);
        if index_a == index_b {
            return;
        }
        self.tiles.swap(index_a, index_b);
        self.tiles[index_a].pos = a;
        self.tiles[index_b].pos = b;
        self.sync_populated(a, index_a);
        self.sync_populated(b, index_b);
    }

    pub fn is_populated(&self, pos: Pos) -> bool {
        self.populated.contains(&pos)
    }

    pub fn populated_count(&self) -> usize {
        self.populated.len()
    }

    /// Populated positions in row-major order.
    pub fn populated_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.populated.iter().copied()
    }

    pub fn occupied_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.populated.iter().map(|&pos| &self.tiles[self.checked_index(pos)])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    pub fn empty_positions(&self) -> Vec<Pos> {
        self.tiles.iter().filter(|tile| tile.is_empty()).map(|tile| tile.pos).collect()
    }

    pub fn unfixed_positions(&self) -> Vec<Pos> {
        self.tiles.iter().filter(|tile| !tile.fixed).map(|tile| tile.pos).collect()
    }

    pub fn find_first(&self, kind: EntityKind) -> Option<&Tile> {
        self.occupied_tiles().find(|tile| tile.kind == kind)
    }

    pub fn find_all(&self, kind: EntityKind) -> Vec<&Tile> {
        self.occupied_tiles().filter(|tile| tile.kind == kind).collect()
    }

    /// Occupied tiles within Euclidean `radius` of `center`, boundary inclusive.
    pub fn tiles_within_radius(
        &self,
        center: Pos,
        radius: f64,
        exclude_center: bool,
    ) -> Vec<&Tile> {
        let reach = radius.max(0.0).floor() as i32;
        let mut found = Vec::new();
        for y in span(center.y, reach, self.bounds.height) {
            for x in span(center.x, reach, self.bounds.width) {
                let pos = Pos { y, x };
                if exclude_center && pos == center {
                    continue;
                }
                if !self.is_populated(pos) || !center.within(pos, radius) {
                    continue;
                }
                if let Some(tile) = self.get(pos) {
                    found.push(tile);
                }
            }
        }
        found
    }

    /// Same-kind occupants in the Chebyshev box of `radius` around `tile`, excluding
    /// itself.
    pub fn count_same_type_neighbors(&self, tile: &Tile, radius: i32) -> usize {
        let reach = radius.max(0);
        let mut count = 0;
        for y in span(tile.pos.y, reach, self.bounds.height) {
            for x in span(tile.pos.x, reach, self.bounds.width) {
                let pos = Pos { y, x };
                if pos == tile.pos {
                    continue;
                }
                if self.get(pos).is_some_and(|other| other.kind == tile.kind) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn count_within_distance(&self, origin: Pos, kind: EntityKind, max_distance: f64) -> usize {
        self.occupied_tiles()
            .filter(|tile| tile.kind == kind && origin.within(tile.pos, max_distance))
            .count()
    }

    pub fn any_within_distance(&self, origin: Pos, kind: EntityKind, max_distance: f64) -> bool {
        self.occupied_tiles().any(|tile| tile.kind == kind && origin.within(tile.pos, max_distance))
    }

    /// Marks every occupied tile fixed; returns how many were newly frozen.
    pub fn fix_occupied(&mut self) -> usize {
        let mut newly_fixed = 0;
        for &pos in &self.populated {
            let index = self.bounds.width * (pos.y as usize) + (pos.x as usize);
            let tile = &mut self.tiles[index];
            if !tile.fixed {
                tile.fixed = true;
                newly_fixed += 1;
            }
        }
        newly_fixed
    }

    pub fn presentation_mut(&mut self, pos: Pos) -> Option<&mut Presentation> {
        self.bounds.index(pos).map(|index| &mut self.tiles[index].presentation)
    }

    pub fn contents_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        let index = self.bounds.index(pos)?;
        self.tiles[index].contains.as_deref_mut()
    }

    /// True when the populated index matches tile contents exactly.
    pub fn is_consistent(&self) -> bool {
        self.tiles.iter().enumerate().all(|(index, tile)| {
            tile.pos == self.bounds.pos_at(index)
                && tile.is_empty() != self.populated.contains(&tile.pos)
        }) && self.populated.iter().all(|&pos| self.bounds.contains(pos))
    }

    fn checked_index(&self, pos: Pos) -> usize {
        match self.bounds.index(pos) {
            Some(index) => index,
            None => panic!(
                "position {pos:?} is outside the {}x{} grid",
                self.bounds.width, self.bounds.height
            ),
        }
    }

    fn sync_populated(&mut self, pos: Pos, index: usize) {
        if self.tiles[index].is_empty() {
            self.populated.remove(&pos);
        } else {
            self.populated.insert(pos);
        }
    }
}

/// Coordinates within `reach` of `center` along an axis of `len` cells, clipped to
/// the grid.
fn span(center: i32, reach: i32, len: usize) -> RangeInclusive<i32> {
    let last = i32::try_from(len).unwrap_or(i32::MAX) - 1;
    center.saturating_sub(reach).max(0)..=center.saturating_add(reach).min(last)
}
