//! High-level floor generation: runs every layer of a plan, then the finalize pass.

use log::{debug, info};
use rand_chacha::rand_core::Rng;

use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::error::GenerationError;

use super::finalize::finalize;
use super::grid::Grid;
use super::layers::{Layer, LayerPlan};
use super::model::{GeneratedFloor, LayerSummary};
use super::placement::PlacementEngine;
use super::seed::floor_rng;

pub struct MapGenerator {
    run_seed: u64,
    config: GenerationConfig,
    catalog: Catalog,
    plan: LayerPlan,
}

impl MapGenerator {
    pub fn new(run_seed: u64, config: GenerationConfig, catalog: Catalog) -> Self {
        Self { run_seed, config, catalog, plan: LayerPlan::default() }
    }

    pub fn with_plan(mut self, plan: LayerPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generate(&self, floor_index: u8) -> Result<GeneratedFloor, GenerationError> {
        self.config.validate()?;
        let mut grid = Grid::new(self.config.width, self.config.height);
        let rng = floor_rng(self.run_seed, floor_index);
        let mut engine = PlacementEngine::new(&self.catalog, &self.config, rng);

        let mut layers = Vec::with_capacity(self.plan.layers.len());
        for layer in &self.plan.layers {
            layers.push(build_layer(&mut engine, &mut grid, layer)?);
        }

        let score = engine.scorer().score(&grid);
        let index = finalize(&mut grid, &self.catalog, &self.config);
        info!(
            "floor {floor_index} (seed {}): {} occupants, score {score}",
            self.run_seed,
            grid.populated_count()
        );

        Ok(GeneratedFloor {
            floor_index,
            grid,
            chest_locations: index.chest_locations,
            wall_locations: index.wall_locations,
            layers,
            score,
        })
    }
}

fn build_layer<R: Rng>(
    engine: &mut PlacementEngine<'_, R>,
    grid: &mut Grid,
    layer: &Layer,
) -> Result<LayerSummary, GenerationError> {
    let requested = layer.requested();
    let mut placed = 0;
    let mut unplaced = 0;
    for batch in &layer.batches {
        let report = engine.place_layer(grid, batch.kind, batch.count, &batch.overrides)?;
        placed += report.placed.len();
        unplaced += report.unplaced;
    }
    if requested > 0 && placed == 0 {
        return Err(GenerationError::LayerUnplaceable { layer: layer.name.clone(), requested });
    }

    let optimized = engine.optimize_and_fix(grid);
    debug!(
        "layer {}: placed {placed}/{requested}, {} swaps, score {}",
        layer.name, optimized.swaps, optimized.final_score
    );
    Ok(LayerSummary {
        name: layer.name.clone(),
        requested,
        placed,
        unplaced,
        swaps: optimized.swaps,
        score: optimized.final_score,
    })
}
