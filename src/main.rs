//! vulpine - CLI entry point
//!
//! Deterministic grid-based predator-prey ecosystem simulator.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use vulpine::{benchmark, render, scenario, Scenario, Settings, World};

#[derive(Parser)]
#[command(name = "vulpine")]
#[command(author = "Gabriele (dbowie)")]
#[command(version)]
#[command(about = "Deterministic grid-based predator-prey ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the final report to stdout
    Run {
        /// Scenario file (thresholds, dimensions, entity placements)
        scenario: PathBuf,

        /// Override the scenario's generation count
        #[arg(short, long)]
        generations: Option<u32>,

        /// Print a grid snapshot to stderr every generation
        #[arg(long)]
        snapshots: bool,

        /// Write per-generation statistics to a JSON file
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Quiet mode (final report only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a random scenario file from settings
    Generate {
        /// Settings file (YAML); defaults are used if it does not exist
        #[arg(short, long, default_value = "settings.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output scenario file
        #[arg(short, long, default_value = "scenario.txt")]
        output: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "1000")]
        generations: u32,

        /// Initial rabbit count
        #[arg(long, default_value = "200")]
        rabbits: usize,

        /// Initial fox count
        #[arg(long, default_value = "40")]
        foxes: usize,
    },

    /// Generate default settings file
    Init {
        /// Output path
        #[arg(short, long, default_value = "settings.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            generations,
            snapshots,
            stats,
            quiet,
        } => run_scenario(scenario, generations, snapshots, stats, quiet),

        Commands::Generate {
            config,
            seed,
            output,
        } => generate_scenario(config, seed, output),

        Commands::Benchmark {
            generations,
            rabbits,
            foxes,
        } => run_benchmark(generations, rabbits, foxes),

        Commands::Init { output } => generate_settings(output),
    }
}

fn run_scenario(
    scenario_path: PathBuf,
    generations_override: Option<u32>,
    snapshots: bool,
    stats_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_file(&scenario_path)?;
    let generations = generations_override.unwrap_or(scenario.generations);

    let mut world = World::from_scenario(&scenario);

    log::info!(
        "Loaded scenario {:?}: {}x{} grid, {} entities, {} generations",
        scenario_path,
        scenario.rows,
        scenario.cols,
        scenario.placements.len(),
        generations
    );

    if snapshots {
        eprint!("{}", render::snapshot(&world));
    }

    let start = Instant::now();
    for _ in 0..generations {
        world.step();

        if snapshots {
            eprintln!();
            eprint!("{}", render::snapshot(&world));
        }
        log::debug!("{}", world.stats.summary());

        if world.is_extinct() {
            log::info!("Both populations extinct at generation {}", world.generation);
            break;
        }
    }
    let elapsed = start.elapsed();

    if !quiet {
        log::info!(
            "Simulated {} generations in {:.3}s ({} rabbits, {} foxes surviving)",
            world.generation,
            elapsed.as_secs_f64(),
            world.rabbits.alive_count(),
            world.foxes.alive_count()
        );
    }

    if let Some(path) = stats_path {
        world
            .stats_history
            .save(path.to_str().ok_or("stats path is not valid UTF-8")?)?;
        log::info!("Stats history saved to {:?}", path);
    }

    print!("{}", scenario::final_report(&world));
    Ok(())
}

fn generate_scenario(
    config_path: PathBuf,
    seed: Option<u64>,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = if config_path.exists() {
        log::info!("Loading settings from {:?}", config_path);
        Settings::from_file(&config_path)?
    } else {
        log::info!("Using default settings");
        Settings::default()
    };

    let seed = seed.unwrap_or_else(rand::random);
    log::info!("Using seed: {}", seed);

    let scenario = Scenario::random(&settings, seed);
    std::fs::write(&output, scenario.to_text())?;

    println!(
        "Scenario with {} entities on a {}x{} grid written to {:?}",
        scenario.placements.len(),
        scenario.rows,
        scenario.cols,
        output
    );
    Ok(())
}

fn run_benchmark(
    generations: u32,
    rabbits: usize,
    foxes: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== vulpine benchmark ===");
    println!("Generations: {}", generations);
    println!("Rabbits: {}, Foxes: {}", rabbits, foxes);
    println!();

    let result = benchmark(generations, rabbits, foxes);
    println!("{}", result);

    Ok(())
}

fn generate_settings(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::default();
    settings.save(&output)?;
    println!("Settings saved to {:?}", output);
    Ok(())
}
