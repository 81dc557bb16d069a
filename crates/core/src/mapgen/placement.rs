//! Layered placement: random seeding, randomized-order hill climbing, then freezing.
//!
//! Each layer seeds its entities into random empty cells, runs a fixed number of
//! refinement passes over the unfixed tiles, and finally fixes every occupied tile so
//! later layers can only work around it.

use log::{debug, trace, warn};
use rand_chacha::rand_core::Rng;

use crate::catalog::Catalog;
use crate::config::{GenerationConfig, PartnerScope};
use crate::error::GenerationError;
use crate::types::{EntityKind, Pos};

use super::grid::Grid;
use super::happiness::Scorer;
use super::seed::{random_index, shuffle};
use super::tile::TileOverrides;

/// Outcome of seeding one batch of entities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerReport {
    pub placed: Vec<Pos>,
    /// Requests dropped because no empty cell remained.
    pub unplaced: usize,
}

/// Outcome of one refinement pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassTrace {
    /// Grid score after each anchor was processed, in processing order.
    pub anchor_scores: Vec<i64>,
    pub swaps: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub passes: usize,
    pub swaps: usize,
    pub initial_score: i64,
    pub final_score: i64,
    pub newly_fixed: usize,
}

/// Score change from swapping `a` and `b`, relative to `baseline`. The swap is undone
/// before returning, so the grid is left exactly as it was.
pub fn trial_swap(grid: &mut Grid, scorer: &Scorer<'_>, a: Pos, b: Pos, baseline: i64) -> i64 {
    grid.swap(a, b);
    let trial_score = scorer.score(grid);
    grid.swap(a, b);
    trial_score - baseline
}

pub struct PlacementEngine<'a, R> {
    catalog: &'a Catalog,
    config: &'a GenerationConfig,
    rng: R,
}

impl<'a, R: Rng> PlacementEngine<'a, R> {
    pub fn new(catalog: &'a Catalog, config: &'a GenerationConfig, rng: R) -> Self {
        Self { catalog, config, rng }
    }

    pub fn scorer(&self) -> Scorer<'a> {
        Scorer::new(self.catalog, &self.config.weights)
    }

    /// Drops `count` instances of `kind` into uniformly chosen empty cells. Requests
    /// beyond the grid's remaining capacity are counted in `unplaced`, not failed.
    pub fn place_layer(
        &mut self,
        grid: &mut Grid,
        kind: EntityKind,
        count: usize,
        overrides: &TileOverrides,
    ) -> Result<LayerReport, GenerationError> {
        self.catalog.entry(kind)?;

        let mut report = LayerReport::default();
        for placed_so_far in 0..count {
            let empty = grid.empty_positions();
            if empty.is_empty() {
                report.unplaced = count - placed_so_far;
                warn!("no empty cell left for {kind:?}; dropped {} requests", report.unplaced);
                break;
            }
            let pos = empty[random_index(&mut self.rng, empty.len())];
            grid.set(pos, self.catalog.instantiate(kind, overrides)?);
            report.placed.push(pos);
        }

        trace!("seeded {} of {count} {kind:?}", report.placed.len());
        Ok(report)
    }

    /// Runs the configured refinement passes, then fixes every occupied tile.
    pub fn optimize_and_fix(&mut self, grid: &mut Grid) -> OptimizeReport {
        let scorer = self.scorer();
        let initial_score = scorer.score(grid);
        let mut swaps = 0;
        for pass in 0..self.config.swap_passes {
            let trace = self.refine_pass(grid);
            swaps += trace.swaps;
            debug!(
                "pass {pass}: {} anchors, {} swaps, score {:?}",
                trace.anchor_scores.len(),
                trace.swaps,
                trace.anchor_scores.last()
            );
        }

        let final_score = scorer.score(grid);
        let newly_fixed = grid.fix_occupied();
        debug!(
            "layer settled at {final_score} (from {initial_score}); fixed {newly_fixed} tiles"
        );

        OptimizeReport {
            passes: self.config.swap_passes,
            swaps,
            initial_score,
            final_score,
            newly_fixed,
        }
    }

    /// One randomized-order pass. For every unfixed occupant (the anchor) the partner
    /// giving the highest score not below the best seen so far is committed; `>=` keeps
    /// the later-examined partner on ties.
    pub fn refine_pass(&mut self, grid: &mut Grid) -> PassTrace {
        let scorer = self.scorer();
        let mut anchors: Vec<Pos> =
            grid.occupied_tiles().filter(|tile| !tile.fixed).map(|tile| tile.pos).collect();
        shuffle(&mut self.rng, &mut anchors);
        let open_cells = match self.config.partner_scope {
            PartnerScope::Unfixed => grid.unfixed_positions(),
            PartnerScope::Occupied => Vec::new(),
        };

        let mut trace = PassTrace::default();
        let mut best_score = scorer.score(grid);
        for anchor_index in 0..anchors.len() {
            let anchor = anchors[anchor_index];
            if grid.get(anchor).is_none_or(|tile| tile.fixed) {
                continue;
            }

            let partners = match self.config.partner_scope {
                PartnerScope::Unfixed => open_cells.clone(),
                PartnerScope::Occupied => anchors.clone(),
            };
            let baseline = best_score;
            let mut best_partner = None;
            for partner in partners {
                if partner == anchor {
                    continue;
                }
                let candidate = baseline + trial_swap(grid, &scorer, anchor, partner, baseline);
                if candidate >= best_score {
                    best_score = candidate;
                    best_partner = Some(partner);
                }
            }

            if let Some(partner) = best_partner {
                grid.swap(anchor, partner);
                follow_swap(&mut anchors, anchor, partner);
                trace.swaps += 1;
            }
            trace.anchor_scores.push(scorer.score(grid));
        }
        trace
    }
}

/// Keeps position-keyed anchor entries pointing at the same tiles after `a` and `b`
/// trade places.
fn follow_swap(anchors: &mut [Pos], a: Pos, b: Pos) {
    for entry in anchors.iter_mut() {
        if *entry == a {
            *entry = b;
        } else if *entry == b {
            *entry = a;
        }
    }
}
