//! # vulpine
//!
//! Deterministic grid-based predator-prey ecosystem simulator.
//!
//! Rabbits and foxes share a rectangular grid with static rocks. Each
//! generation runs the rabbit phase, then the fox phase: deterministic
//! movement planning, destination-conflict resolution, predation,
//! starvation and reproduction. Identical inputs always yield
//! byte-identical final reports.
//!
//! ## Features
//!
//! - **Deterministic**: destinations come from `(generation + x + y) mod P`,
//!   never from a stateful RNG
//! - **Parallel**: the planning sub-phase runs on all cores via Rayon
//! - **Reproducible fixtures**: random scenarios are seeded via ChaCha8
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vulpine::{scenario, Scenario, World};
//!
//! let scenario = Scenario::from_file("scenario.txt").unwrap();
//! let mut world = World::from_scenario(&scenario);
//! world.run(scenario.generations);
//!
//! print!("{}", scenario::final_report(&world));
//! ```

pub mod animal;
pub mod config;
pub mod grid;
pub mod planner;
pub mod render;
pub mod resolver;
pub mod scenario;
pub mod stats;
pub mod world;

// Re-export main types
pub use config::Settings;
pub use scenario::Scenario;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark on a randomly seeded world
pub fn benchmark(generations: u32, rabbits: usize, foxes: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut settings = Settings::default();
    settings.seeding.rabbits = rabbits;
    settings.seeding.foxes = foxes;

    let mut world = World::random_with_seed(&settings, 42);

    let start = Instant::now();
    world.run(generations);
    let elapsed = start.elapsed();

    BenchmarkResult {
        generations,
        initial_rabbits: rabbits,
        initial_foxes: foxes,
        final_rabbits: world.rabbits.alive_count(),
        final_foxes: world.foxes.alive_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u32,
    pub initial_rabbits: usize,
    pub initial_foxes: usize,
    pub final_rabbits: usize,
    pub final_foxes: usize,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(
            f,
            "Rabbits: {} -> {}",
            self.initial_rabbits, self.final_rabbits
        )?;
        writeln!(f, "Foxes: {} -> {}", self.initial_foxes, self.final_foxes)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}
