pub mod catalog;
pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use catalog::{Catalog, CatalogEntry, PositionalRule};
pub use config::{GenerationConfig, HappinessWeights, PartnerScope};
pub use error::GenerationError;
pub use mapgen::{GeneratedFloor, Grid, MapGenerator, Tile, generate_floor, new_floor};
pub use types::*;
