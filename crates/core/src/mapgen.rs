//! Procedural floor generation split into coherent submodules.

pub mod happiness;
pub mod layers;
pub mod model;
pub mod placement;

mod finalize;
mod generator;
mod grid;
mod seed;
mod tile;

pub use finalize::{FloorIndex, finalize};
pub use generator::MapGenerator;
pub use grid::{Bounds, Grid};
pub use happiness::Scorer;
pub use layers::{Batch, Layer, LayerPlan, standard_floor_plan};
pub use model::{GeneratedFloor, LayerSummary};
pub use placement::{LayerReport, OptimizeReport, PassTrace, PlacementEngine, trial_swap};
pub use seed::floor_rng;
pub use tile::{Contents, EMPTY_TILE_NAME, Presentation, Tile, TileOverrides};

use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::error::GenerationError;

/// Empty floor of the given size, every cell unoccupied.
pub fn new_floor(width: usize, height: usize) -> Result<Grid, GenerationError> {
    GenerationConfig::with_size(width, height).validate()?;
    Ok(Grid::new(width, height))
}

/// Standard floor with the default config, catalog and layer plan.
pub fn generate_floor(run_seed: u64, floor_index: u8) -> Result<GeneratedFloor, GenerationError> {
    MapGenerator::new(run_seed, GenerationConfig::default(), Catalog::build_default())
        .generate(floor_index)
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, MapGenerator};
    use crate::catalog::Catalog;
    use crate::error::GenerationError;

    #[test]
    fn generate_floor_matches_map_generator_output() {
        let seed = 123_u64;
        let floor_index = 2_u8;

        let from_helper = super::generate_floor(seed, floor_index).expect("default floor");
        let from_generator =
            MapGenerator::new(seed, GenerationConfig::default(), Catalog::build_default())
                .generate(floor_index)
            .expect("default floor");

        assert_eq!(from_helper, from_generator);
    }

    #[test]
    fn new_floor_starts_empty_and_rejects_zero_size() {
        let grid = super::new_floor(13, 10).expect("valid size");
        assert_eq!(grid.populated_count(), 0);
        assert_eq!(grid.empty_positions().len(), 130);
        assert!(matches!(super::new_floor(13, 0), Err(GenerationError::InvalidDimensions { .. })));
    }
}
