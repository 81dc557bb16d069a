//! Happiness scoring: the scalar objective the placement search climbs.
//!
//! The score is the sum of every occupied tile's catalog positional rule plus the
//! relational rules below, which look at where other kinds sit on the floor. Rules
//! whose partner kind is absent contribute nothing, so partially built floors score
//! without special cases.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::config::HappinessWeights;
use crate::types::EntityKind;

use super::grid::{Bounds, Grid};
use super::tile::Tile;

/// Occupants the orb must not reveal.
pub const ORB_FORBIDDEN_REVEALS: [EntityKind; 10] = [
    EntityKind::Dragon,
    EntityKind::Gazer,
    EntityKind::Chest,
    EntityKind::SpellMakeOrb,
    EntityKind::RatKing,
    EntityKind::Mine,
    EntityKind::Fidel,
    EntityKind::DragonEgg,
    EntityKind::BigSlime,
    EntityKind::Mimic,
];

const ROMEO: &str = "romeo";
const JULIET: &str = "juliet";
const RAT_GUARD_SUFFIX: &str = "_guard";

#[derive(Clone, Copy)]
pub struct Scorer<'a> {
    catalog: &'a Catalog,
    weights: &'a HappinessWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(catalog: &'a Catalog, weights: &'a HappinessWeights) -> Self {
        Self { catalog, weights }
    }

    pub fn score(&self, grid: &Grid) -> i64 {
        let by_kind = KindIndex::build(grid);
        let bounds = grid.bounds();
        grid.occupied_tiles()
            .map(|tile| {
                self.catalog.positional_score(tile, bounds)
                    + self.relational_score(tile, grid, &by_kind, bounds)
            })
            .sum()
    }

    fn relational_score(
        &self,
        tile: &Tile,
        grid: &Grid,
        by_kind: &KindIndex<'_>,
        bounds: Bounds,
    ) -> i64 {
        let weights = self.weights;
        match tile.kind {
            EntityKind::BigSlime => by_kind.first(EntityKind::Wizard).map_or(0, |wizard| {
                let near = tile.is_near(wizard, weights.companion_radius);
                bonus_if(near, weights.big_slime_wizard_bonus)
            }),
            EntityKind::DragonEgg => by_kind.first(EntityKind::Dragon).map_or(0, |dragon| {
                bonus_if(tile.is_near(dragon, weights.companion_radius), weights.dragon_egg_bonus)
            }),
            EntityKind::Gnome => {
                let near_medikit = by_kind
                    .all(EntityKind::Medikit)
                    .iter()
                    .any(|medikit| tile.is_near(medikit, weights.companion_radius));
                bonus_if(near_medikit, weights.gnome_medikit_bonus)
            }
            EntityKind::Gargoyle => self.gargoyle_score(tile, by_kind),
            EntityKind::Giant => self.giant_score(tile, by_kind, bounds),
            EntityKind::Minotaur => self.minotaur_score(tile, by_kind),
            EntityKind::Rat => {
                if !tile.name.ends_with(RAT_GUARD_SUFFIX) {
                    return 0;
                }
                by_kind.first(EntityKind::RatKing).map_or(0, |king| {
                    let beside =
                        tile.is_near(king, weights.rat_guard_radius) && tile.pos.y == king.pos.y;
                    bonus_if(beside, weights.rat_guard_bonus)
                })
            }
            EntityKind::Chest => {
                -weights.chest_cluster_penalty
                    * grid.count_same_type_neighbors(tile, weights.chest_cluster_radius) as i64
            }
            EntityKind::Medikit => {
                -weights.medikit_cluster_penalty
                    * grid.count_same_type_neighbors(tile, weights.medikit_cluster_radius) as i64
            }
            EntityKind::Wall => weights.wall_bonus,
            EntityKind::Orb => self.orb_score(tile, grid, by_kind),
            _ => 0,
        }
    }

    /// Only the first other gargoyle sharing this one's name counts as its twin.
    fn gargoyle_score(&self, tile: &Tile, by_kind: &KindIndex<'_>) -> i64 {
        let twin = by_kind
            .all(EntityKind::Gargoyle)
            .iter()
            .find(|other| other.pos != tile.pos && other.name == tile.name);
        twin.map_or(0, |twin| {
            bonus_if(tile.is_near(twin, self.weights.twin_radius), self.weights.gargoyle_twin_bonus)
        })
    }

    fn giant_score(&self, tile: &Tile, by_kind: &KindIndex<'_>, bounds: Bounds) -> i64 {
        let Some(love) = by_kind.all(EntityKind::Giant).iter().find(|other| other.pos != tile.pos)
        else {
            return 0;
        };

        let pivot_x = bounds.pivot().x;
        let on_own_side = (tile.name == ROMEO && tile.pos.x < pivot_x)
            || (tile.name == JULIET && tile.pos.x > pivot_x);

        // Doubled coordinates keep the mirror test exact for odd widths.
        let width = bounds.width as i32;
        let mirrored = tile.pos.y == love.pos.y
            && (2 * tile.pos.x - width).abs() == (2 * love.pos.x - width).abs();

        bonus_if(on_own_side, self.weights.giant_side_bonus)
            + bonus_if(mirrored, self.weights.giant_mirror_bonus)
    }

    /// Wants exactly the configured number of chests nearby and no other minotaur close by.
    fn minotaur_score(&self, tile: &Tile, by_kind: &KindIndex<'_>) -> i64 {
        let radius = self.weights.minotaur_radius;
        let crowded = by_kind
            .all(EntityKind::Minotaur)
            .iter()
            .any(|other| other.pos != tile.pos && tile.is_near(other, radius));
        if crowded {
            return 0;
        }

        let chests = by_kind.all(EntityKind::Chest);
        if chests.is_empty() {
            return 0;
        }
        let nearby_chests = chests.iter().filter(|chest| tile.is_near(chest, radius)).count();
        bonus_if(
            nearby_chests == self.weights.minotaur_required_chests,
            self.weights.minotaur_chest_bonus,
        )
    }

    fn orb_score(&self, orb: &Tile, grid: &Grid, by_kind: &KindIndex<'_>) -> i64 {
        let weights = self.weights;
        let radius = weights.orb_radius;
        let count_near = |kind: EntityKind| {
            by_kind.all(kind).iter().filter(|other| orb.is_near(other, radius)).count()
        };
        let medikits = count_near(EntityKind::Medikit);
        let walls = count_near(EntityKind::Wall);

        let mut score = bonus_if(medikits == 1 && walls > 0, weights.orb_medikit_bonus);
        if walls > weights.orb_wall_allowance {
            score -= (walls - weights.orb_wall_allowance) as i64 * weights.orb_wall_penalty;
        }

        let forbidden = grid
            .tiles_within_radius(orb.pos, radius, true)
            .into_iter()
            .filter(|other| ORB_FORBIDDEN_REVEALS.contains(&other.kind))
            .count();
        score - forbidden as i64 * weights.orb_forbidden_penalty
    }
}

fn bonus_if(condition: bool, bonus: i64) -> i64 {
    if condition { bonus } else { 0 }
}

/// Occupied tiles grouped by kind, each group in row-major order.
struct KindIndex<'g> {
    groups: BTreeMap<EntityKind, Vec<&'g Tile>>,
}

impl<'g> KindIndex<'g> {
    fn build(grid: &'g Grid) -> Self {
        let mut groups: BTreeMap<EntityKind, Vec<&'g Tile>> = BTreeMap::new();
        for tile in grid.occupied_tiles() {
            groups.entry(tile.kind).or_default().push(tile);
        }
        Self { groups }
    }

    fn all(&self, kind: EntityKind) -> &[&'g Tile] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn first(&self, kind: EntityKind) -> Option<&'g Tile> {
        self.all(kind).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::TileOverrides;
    use crate::types::Pos;

    fn place(
        grid: &mut Grid,
        catalog: &Catalog,
        kind: EntityKind,
        name: Option<&str>,
        x: i32,
        y: i32,
    ) {
        let overrides = name.map(TileOverrides::named).unwrap_or_default();
        let tile = catalog.instantiate(kind, &overrides).expect("kind is catalogued");
        grid.set(Pos::new(x, y), tile);
    }

    fn score(grid: &Grid, catalog: &Catalog, weights: &HappinessWeights) -> i64 {
        Scorer::new(catalog, weights).score(grid)
    }

    #[test]
    fn empty_grid_scores_zero() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        assert_eq!(score(&Grid::new(13, 10), &catalog, &weights), 0);
    }

    #[test]
    fn dragon_prefers_center_cell() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Dragon, None, 6, 5);
        assert_eq!(score(&grid, &catalog, &weights), 10_000);

        grid.swap(Pos::new(6, 5), Pos::new(0, 0));
        assert_eq!(score(&grid, &catalog, &weights), 0);
    }

    #[test]
    fn companion_bonus_needs_partner_in_range() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::DragonEgg, None, 3, 3);
        assert_eq!(score(&grid, &catalog, &weights), 0, "missing dragon is not an error");

        place(&mut grid, &catalog, EntityKind::Dragon, None, 4, 4);
        assert_eq!(score(&grid, &catalog, &weights), 9_000);

        grid.swap(Pos::new(4, 4), Pos::new(5, 4));
        assert_eq!(score(&grid, &catalog, &weights), 0);
    }

    #[test]
    fn big_slime_counts_only_first_wizard() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        // Keep wizards off the edge so their positional rule stays quiet.
        place(&mut grid, &catalog, EntityKind::Wizard, None, 2, 2);
        place(&mut grid, &catalog, EntityKind::Wizard, None, 8, 6);
        place(&mut grid, &catalog, EntityKind::BigSlime, None, 8, 7);
        assert_eq!(score(&grid, &catalog, &weights), 0);

        grid.swap(Pos::new(8, 7), Pos::new(3, 3));
        assert_eq!(score(&grid, &catalog, &weights), 1_000);
    }

    #[test]
    fn giants_reward_sides_and_mirror_symmetry() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Giant, Some(ROMEO), 5, 4);
        place(&mut grid, &catalog, EntityKind::Giant, Some(JULIET), 8, 4);
        // Both on their side, mirrored about x = 6.5 on the same row.
        assert_eq!(score(&grid, &catalog, &weights), 2 * (1_000 + 10_000));

        grid.swap(Pos::new(8, 4), Pos::new(8, 5));
        assert_eq!(score(&grid, &catalog, &weights), 2 * 1_000);

        grid.swap(Pos::new(5, 4), Pos::new(7, 4));
        assert_eq!(score(&grid, &catalog, &weights), 1_000);
    }

    #[test]
    fn gargoyle_twins_match_by_name() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Gargoyle, Some("gargoyle1"), 4, 4);
        place(&mut grid, &catalog, EntityKind::Gargoyle, Some("gargoyle2"), 5, 4);
        assert_eq!(score(&grid, &catalog, &weights), 0);

        place(&mut grid, &catalog, EntityKind::Gargoyle, Some("gargoyle1"), 3, 5);
        assert_eq!(score(&grid, &catalog, &weights), 2_000);
    }

    #[test]
    fn chests_penalize_same_type_clusters() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Chest, None, 0, 0);
        place(&mut grid, &catalog, EntityKind::Chest, None, 3, 3);
        assert_eq!(score(&grid, &catalog, &weights), -2_000);

        grid.swap(Pos::new(3, 3), Pos::new(4, 3));
        assert_eq!(score(&grid, &catalog, &weights), 0);
    }

    #[test]
    fn minotaur_wants_exactly_one_chest_and_no_rival() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights { chest_cluster_penalty: 0, ..HappinessWeights::default() };
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Minotaur, None, 5, 5);
        place(&mut grid, &catalog, EntityKind::Chest, None, 5, 3);
        assert_eq!(score(&grid, &catalog, &weights), 10_000);

        place(&mut grid, &catalog, EntityKind::Chest, None, 7, 5);
        assert_eq!(score(&grid, &catalog, &weights), 0, "two chests is not exactly one");

        grid.set(Pos::new(7, 5), Tile::empty(Pos::new(7, 5)));
        place(&mut grid, &catalog, EntityKind::Minotaur, None, 6, 6);
        assert_eq!(score(&grid, &catalog, &weights), 0, "rival minotaur cancels both");
    }

    #[test]
    fn rat_guards_flank_the_rat_king() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::RatKing, None, 5, 5);
        place(&mut grid, &catalog, EntityKind::Rat, Some("rat_guard"), 6, 5);
        place(&mut grid, &catalog, EntityKind::Rat, None, 4, 5);
        assert_eq!(score(&grid, &catalog, &weights), 1_000);

        grid.swap(Pos::new(6, 5), Pos::new(5, 6));
        assert_eq!(score(&grid, &catalog, &weights), 0, "guard must share the king's row");
    }

    #[test]
    fn orb_rules_combine_reveal_bonus_and_penalties() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights { wall_bonus: 0, ..HappinessWeights::default() };
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Orb, None, 6, 5);
        place(&mut grid, &catalog, EntityKind::Medikit, None, 7, 5);
        place(&mut grid, &catalog, EntityKind::Wall, None, 5, 5);
        assert_eq!(score(&grid, &catalog, &weights), 2_000);

        place(&mut grid, &catalog, EntityKind::Wall, None, 6, 4);
        place(&mut grid, &catalog, EntityKind::Wall, None, 6, 6);
        place(&mut grid, &catalog, EntityKind::Wall, None, 5, 4);
        assert_eq!(score(&grid, &catalog, &weights), 2_000 - 2 * 2_000);

        place(&mut grid, &catalog, EntityKind::Mine, None, 8, 6);
        assert_eq!(score(&grid, &catalog, &weights), 2_000 - 2 * 2_000 - 2_000);
    }

    #[test]
    fn orb_near_edge_is_penalized() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Orb, None, 1, 5);
        assert_eq!(score(&grid, &catalog, &weights), -10_000);
    }

    #[test]
    fn walls_score_flat_bonus_each() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Wall, None, 0, 0);
        place(&mut grid, &catalog, EntityKind::Wall, None, 1, 0);
        assert_eq!(score(&grid, &catalog, &weights), 4_000);
    }

    #[test]
    fn scoring_twice_is_stable() {
        let catalog = Catalog::build_default();
        let weights = HappinessWeights::default();
        let mut grid = Grid::new(13, 10);
        place(&mut grid, &catalog, EntityKind::Gnome, None, 2, 2);
        place(&mut grid, &catalog, EntityKind::Medikit, None, 3, 3);
        place(&mut grid, &catalog, EntityKind::Guard, Some("guard3"), 10, 8);
        let first = score(&grid, &catalog, &weights);
        assert_eq!(first, 10_000 + 2_500);
        assert_eq!(score(&grid, &catalog, &weights), first);
    }
}
