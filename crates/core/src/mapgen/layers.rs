//! Layer plans: which entities each placement layer seeds, and in what order.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::types::EntityKind;

use super::tile::TileOverrides;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub kind: EntityKind,
    pub count: usize,
    #[serde(default)]
    pub overrides: TileOverrides,
}

impl Batch {
    pub fn new(kind: EntityKind, count: usize) -> Self {
        Self { kind, count, overrides: TileOverrides::default() }
    }

    pub fn with(mut self, overrides: TileOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Batches seeded together, refined together, then frozen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub batches: Vec<Batch>,
}

impl Layer {
    pub fn new(name: &str, batches: Vec<Batch>) -> Self {
        Self { name: name.to_string(), batches }
    }

    pub fn requested(&self) -> usize {
        self.batches.iter().map(|batch| batch.count).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerPlan {
    pub layers: Vec<Layer>,
}

impl LayerPlan {
    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn requested(&self) -> usize {
        self.layers.iter().map(Layer::requested).sum()
    }
}

impl Default for LayerPlan {
    fn default() -> Self {
        standard_floor_plan()
    }
}

/// The six layers of a regular floor, big set pieces first and filler monsters last.
pub fn standard_floor_plan() -> LayerPlan {
    let named = |kind, name: &str| Batch::new(kind, 1).with(TileOverrides::named(name));
    let twins =
        |name: &str| Batch::new(EntityKind::Gargoyle, 2).with(TileOverrides::named(name));
    let holding = |kind, count, contents, xp| {
        Batch::new(kind, count).with(TileOverrides::containing(contents, xp))
    };

    let mut structures = vec![
        Batch::new(EntityKind::RatKing, 1),
        holding(EntityKind::Wall, 6, EntityKind::Treasure, Some(1)),
        Batch::new(EntityKind::Minotaur, 5),
    ];
    structures.extend(
        ["guard1", "guard2", "guard3", "guard4"].map(|name| named(EntityKind::Guard, name)),
    );
    structures.extend(["gargoyle1", "gargoyle2", "gargoyle3", "gargoyle4"].map(twins));
    structures.extend([
        Batch::new(EntityKind::Gazer, 2),
        Batch::new(EntityKind::Mine, 9),
        Batch::new(EntityKind::Medikit, 5),
        // Plain chests hold the catalog's default treasure.
        Batch::new(EntityKind::Chest, 3),
        holding(EntityKind::Chest, 2, EntityKind::Medikit, None),
        Batch::new(EntityKind::Orb, 1).with(TileOverrides {
            revealed: Some(true),
            ..TileOverrides::named("orb_with_healing")
        }),
        Batch::new(EntityKind::DragonEgg, 1),
    ]);

    LayerPlan {
        layers: vec![
            Layer::new(
                "dragon_and_wizard",
                vec![Batch::new(EntityKind::Dragon, 1), Batch::new(EntityKind::Wizard, 1)],
            ),
            Layer::new("big_slimes", vec![Batch::new(EntityKind::BigSlime, 5)]),
            Layer::new("mine_king", vec![Batch::new(EntityKind::MineKing, 1)]),
            Layer::new(
                "giants",
                vec![named(EntityKind::Giant, "romeo"), named(EntityKind::Giant, "juliet")],
            ),
            Layer::new("structures", structures),
            Layer::new(
                "common_monsters",
                vec![
                    Batch::new(EntityKind::Rat, 13),
                    Batch::new(EntityKind::Bat, 12),
                    Batch::new(EntityKind::Skeleton, 10),
                    Batch::new(EntityKind::Slime, 8),
                    Batch::new(EntityKind::Mimic, 1),
                    Batch::new(EntityKind::Gnome, 1),
                    Batch::new(EntityKind::SpellMakeOrb, 1),
                ],
            ),
        ],
    }
}
