use anyhow::{Result, bail};
use clap::Parser;
use game_core::{
    Catalog, EntityKind, GeneratedFloor, GenerationConfig, MapGenerator, PartnerScope, Pos,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 20)]
    runs: u32,
    /// Let tiles trade places with empty cells during refinement.
    #[arg(long)]
    roam: bool,
}

fn check_invariants(floor: &GeneratedFloor) -> Result<()> {
    if !floor.grid.is_consistent() {
        bail!("Invariant failed: populated index out of sync");
    }
    if floor.grid.occupied_tiles().any(|tile| !tile.fixed) {
        bail!("Invariant failed: occupied tile left unfixed");
    }
    if floor.chest_locations.len() != floor.count(EntityKind::Chest) {
        bail!("Invariant failed: chest list does not match the grid");
    }
    if floor.wall_locations.len() != floor.count(EntityKind::Wall) {
        bail!("Invariant failed: wall list does not match the grid");
    }
    let empty_chest = |pos: &Pos| floor.tile_at(*pos).is_none_or(|chest| chest.contains.is_none());
    if floor.chest_locations.iter().any(empty_chest) {
        bail!("Invariant failed: chest without contents");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Sweeping {} floors from seed {}...", args.runs, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut scores = Vec::with_capacity(args.runs as usize);
    let partner_scope = if args.roam { PartnerScope::Unfixed } else { PartnerScope::Occupied };
    let config = GenerationConfig { partner_scope, ..GenerationConfig::default() };

    for run in 0..args.runs {
        let run_seed = rng.next_u64();
        let floor_index = (run % 5) as u8 + 1;
        let floor = MapGenerator::new(run_seed, config.clone(), Catalog::build_default())
            .generate(floor_index)?;
        check_invariants(&floor)?;
        let dragon = floor.grid.find_first(EntityKind::Dragon);
        if args.roam && dragon.is_none_or(|dragon| !floor.grid.bounds().is_center(dragon.pos)) {
            println!("run {run}: dragon missed the center (seed {run_seed})");
        }
        scores.push(floor.score);
    }

    if let (Some(min), Some(max)) = (scores.iter().min(), scores.iter().max()) {
        let mean = scores.iter().sum::<i64>() / scores.len() as i64;
        println!("Scores: min {min} mean {mean} max {max}");
    }
    println!("Sweep completed successfully.");
    Ok(())
}
