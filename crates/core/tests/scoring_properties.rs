use dragonsweep_core::mapgen::{Bounds, PlacementEngine, Scorer, TileOverrides};
use dragonsweep_core::{
    Catalog, EntityKind, GenerationConfig, Grid, HappinessWeights, PartnerScope, Pos,
};
use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

fn put(grid: &mut Grid, catalog: &Catalog, kind: EntityKind, x: i32, y: i32) {
    let tile = catalog.instantiate(kind, &TileOverrides::default()).expect("catalogued kind");
    grid.set(Pos::new(x, y), tile);
}

#[test]
fn exactly_n_partners_earn_the_bonus_and_one_more_removes_it() {
    let catalog = Catalog::build_default();
    let weights = HappinessWeights {
        minotaur_required_chests: 2,
        chest_cluster_penalty: 0,
        ..HappinessWeights::default()
    };
    let scorer = Scorer::new(&catalog, &weights);

    let mut grid = Grid::new(5, 5);
    put(&mut grid, &catalog, EntityKind::Minotaur, 2, 2);
    put(&mut grid, &catalog, EntityKind::Chest, 0, 2);
    put(&mut grid, &catalog, EntityKind::Chest, 3, 3);
    assert_eq!(scorer.score(&grid), weights.minotaur_chest_bonus);

    put(&mut grid, &catalog, EntityKind::Chest, 2, 4);
    assert_eq!(scorer.score(&grid), 0);
}

#[test]
fn corner_edge_and_center_classification_on_default_floor() {
    let bounds = Bounds { width: 13, height: 10 };
    assert!(bounds.is_corner(Pos::new(0, 0)));
    assert!(!bounds.is_corner(Pos::new(1, 0)));
    assert!(bounds.is_edge(Pos::new(0, 5)));
    assert!(!bounds.is_edge(Pos::new(6, 5)));
    assert!(bounds.is_center(Pos::new(6, 5)));
}

#[test]
fn two_hundred_requests_fill_a_default_floor_and_drop_seventy() {
    let catalog = Catalog::build_default();
    let config = GenerationConfig::default();
    let mut grid = Grid::new(13, 10);
    let mut engine = PlacementEngine::new(&catalog, &config, ChaCha8Rng::seed_from_u64(200));
    let report = engine
        .place_layer(&mut grid, EntityKind::Skeleton, 200, &TileOverrides::default())
        .expect("skeletons are catalogued");
    assert_eq!(report.placed.len(), 130);
    assert_eq!(report.unplaced, 70);
}

#[test]
fn scorer_is_stable_on_an_unmodified_grid() {
    let catalog = Catalog::build_default();
    let config = GenerationConfig::default();
    let mut grid = Grid::new(13, 10);
    let mut engine = PlacementEngine::new(&catalog, &config, ChaCha8Rng::seed_from_u64(3));
    for kind in [
        EntityKind::Orb,
        EntityKind::Medikit,
        EntityKind::Wall,
        EntityKind::Giant,
        EntityKind::Gnome,
    ] {
        engine.place_layer(&mut grid, kind, 2, &TileOverrides::default()).expect("catalogued");
    }
    let scorer = engine.scorer();
    assert_eq!(scorer.score(&grid), scorer.score(&grid));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn fixed_tiles_never_move_in_later_layers(seed in any::<u64>()) {
        let catalog = Catalog::build_default();
        let config = GenerationConfig { swap_passes: 2, ..GenerationConfig::default() };
        let mut grid = Grid::new(8, 6);
        let mut engine = PlacementEngine::new(&catalog, &config, ChaCha8Rng::seed_from_u64(seed));

        for (kind, count) in [(EntityKind::Chest, 4), (EntityKind::Minotaur, 2)] {
            engine
                .place_layer(&mut grid, kind, count, &TileOverrides::default())
                .expect("catalogued");
        }
        engine.optimize_and_fix(&mut grid);
        let frozen: Vec<(Pos, EntityKind)> =
            grid.occupied_tiles().map(|tile| (tile.pos, tile.kind)).collect();

        for (kind, count) in [(EntityKind::Medikit, 5), (EntityKind::Orb, 1)] {
            engine
                .place_layer(&mut grid, kind, count, &TileOverrides::default())
                .expect("catalogued");
        }
        engine.optimize_and_fix(&mut grid);

        for (pos, kind) in frozen {
            prop_assert_eq!(grid.get(pos).map(|tile| tile.kind), Some(kind));
        }
        prop_assert!(grid.is_consistent());
    }

    #[test]
    fn refinement_never_lowers_the_score_after_any_anchor(
        seed in any::<u64>(),
        roam in any::<bool>()
    ) {
        let catalog = Catalog::build_default();
        let partner_scope = if roam { PartnerScope::Unfixed } else { PartnerScope::Occupied };
        let config = GenerationConfig { partner_scope, ..GenerationConfig::default() };
        let mut grid = Grid::new(13, 10);
        let mut engine = PlacementEngine::new(&catalog, &config, ChaCha8Rng::seed_from_u64(seed));
        for (kind, count) in
            [(EntityKind::Gargoyle, 4), (EntityKind::Medikit, 3), (EntityKind::Gnome, 1)]
        {
            engine
                .place_layer(&mut grid, kind, count, &TileOverrides::default())
                .expect("catalogued");
        }

        let scorer = Scorer::new(&catalog, &config.weights);
        let mut previous = scorer.score(&grid);
        let trace = engine.refine_pass(&mut grid);
        prop_assert_eq!(trace.anchor_scores.len(), 8);
        for &score in &trace.anchor_scores {
            prop_assert!(score >= previous, "score dropped from {} to {}", previous, score);
            previous = score;
        }
        prop_assert_eq!(previous, scorer.score(&grid));
    }
}
