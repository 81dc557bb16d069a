use anyhow::{Context, Result};
use clap::Parser;
use game_core::mapgen::LayerPlan;
use game_core::{Catalog, GenerationConfig, MapGenerator};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1)]
    floor: u8,
    /// Generation config JSON; missing fields take their defaults
    #[arg(long)]
    config: Option<String>,
    /// Entity catalog JSON (an array of entries)
    #[arg(long)]
    catalog: Option<String>,
    /// Layer plan JSON (an array of layers)
    #[arg(long)]
    plan: Option<String>,
    /// Print a JSON summary instead of the text grid
    #[arg(long)]
    json: bool,
    /// Log layer progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    floor: u8,
    score: i64,
    unplaced: usize,
    rows: Vec<&'a str>,
    chest_locations: Vec<(i32, i32)>,
    wall_locations: Vec<(i32, i32)>,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
        log::set_max_level(LevelFilter::Debug);
    }

    let config = match &args.config {
        Some(path) => GenerationConfig::from_json_str(&read_file(path)?)
            .with_context(|| format!("Invalid generation config in {path}"))?,
        None => GenerationConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::from_json_str(&read_file(path)?)
            .with_context(|| format!("Invalid catalog in {path}"))?,
        None => Catalog::build_default(),
    };
    let mut generator = MapGenerator::new(args.seed, config, catalog);
    if let Some(path) = &args.plan {
        let plan = LayerPlan::from_json_str(&read_file(path)?)
            .with_context(|| format!("Invalid layer plan in {path}"))?;
        generator = generator.with_plan(plan);
    }

    let floor = generator
        .generate(args.floor)
        .with_context(|| format!("Generation failed for seed {} floor {}", args.seed, args.floor))?;

    if args.json {
        let text = floor.render_text();
        let summary = Summary {
            seed: args.seed,
            floor: args.floor,
            score: floor.score,
            unplaced: floor.unplaced(),
            rows: text.lines().collect(),
            chest_locations: floor.chest_locations.iter().map(|pos| (pos.x, pos.y)).collect(),
            wall_locations: floor.wall_locations.iter().map(|pos| (pos.x, pos.y)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to encode summary")?);
        return Ok(());
    }

    print!("{}", floor.render_text());
    println!("Score: {}", floor.score);
    println!("Unplaced: {}", floor.unplaced());
    println!("Chests: {:?}", floor.chest_locations);
    println!("Walls: {:?}", floor.wall_locations);
    for layer in &floor.layers {
        println!(
            "Layer {:<16} placed {:>3}/{:<3} swaps {:>3} score {}",
            layer.name, layer.placed, layer.requested, layer.swaps, layer.score
        );
    }

    Ok(())
}
