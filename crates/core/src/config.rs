//! Explicit generation settings: floor size, search budget, and scoring magnitudes.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub const DEFAULT_WIDTH: usize = 13;
pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_SWAP_PASSES: usize = 4;
/// Largest floor accepted, in cells.
pub const MAX_CELLS: usize = 1 << 16;

/// Which cells an anchor tile may trade places with during refinement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerScope {
    /// Only other occupied, non-fixed cells. A lone tile never moves.
    #[default]
    Occupied,
    /// Every other non-fixed cell, empty cells included.
    Unfixed,
}

/// Relational bonus and penalty magnitudes plus the radii they apply within.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HappinessWeights {
    pub companion_radius: f64,
    pub big_slime_wizard_bonus: i64,
    pub dragon_egg_bonus: i64,
    pub gnome_medikit_bonus: i64,
    pub twin_radius: f64,
    pub gargoyle_twin_bonus: i64,
    pub giant_side_bonus: i64,
    pub giant_mirror_bonus: i64,
    pub minotaur_radius: f64,
    pub minotaur_required_chests: usize,
    pub minotaur_chest_bonus: i64,
    pub rat_guard_radius: f64,
    pub rat_guard_bonus: i64,
    pub chest_cluster_radius: i32,
    pub chest_cluster_penalty: i64,
    pub medikit_cluster_radius: i32,
    pub medikit_cluster_penalty: i64,
    pub wall_bonus: i64,
    pub orb_radius: f64,
    pub orb_medikit_bonus: i64,
    pub orb_wall_allowance: usize,
    pub orb_wall_penalty: i64,
    pub orb_forbidden_penalty: i64,
}

impl Default for HappinessWeights {
    fn default() -> Self {
        Self {
            companion_radius: 1.5,
            big_slime_wizard_bonus: 1_000,
            dragon_egg_bonus: 9_000,
            gnome_medikit_bonus: 10_000,
            twin_radius: 1.5,
            gargoyle_twin_bonus: 1_000,
            giant_side_bonus: 1_000,
            giant_mirror_bonus: 10_000,
            minotaur_radius: 2.0,
            minotaur_required_chests: 1,
            minotaur_chest_bonus: 10_000,
            rat_guard_radius: 1.0,
            rat_guard_bonus: 1_000,
            chest_cluster_radius: 3,
            chest_cluster_penalty: 1_000,
            medikit_cluster_radius: 4,
            medikit_cluster_penalty: 1_000,
            wall_bonus: 2_000,
            orb_radius: 2.5,
            orb_medikit_bonus: 2_000,
            orb_wall_allowance: 2,
            orb_wall_penalty: 2_000,
            orb_forbidden_penalty: 2_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    /// Hill-climbing passes per layer.
    pub swap_passes: usize,
    pub partner_scope: PartnerScope,
    pub weights: HappinessWeights,
    /// Hit points handed to walls in row-major order, cycling.
    pub wall_hp_cycle: Vec<i32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            swap_passes: DEFAULT_SWAP_PASSES,
            partner_scope: PartnerScope::default(),
            weights: HappinessWeights::default(),
            wall_hp_cycle: vec![1, 2, 3],
        }
    }
}

impl GenerationConfig {
    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let cells = self.width.checked_mul(self.height);
        if !cells.is_some_and(|cells| cells > 0 && cells <= MAX_CELLS) {
            return Err(GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
