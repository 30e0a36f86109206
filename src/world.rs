//! World state and the generation driver.

use crate::animal::{Animal, Population, Species};
use crate::config::{RuleSettings, Settings};
use crate::grid::{Cell, Grid, Occupant, OccupantIndex, Pos};
use crate::resolver::{self, PhaseOutcome};
use crate::scenario::{EntityKind, Scenario};
use crate::stats::{GenerationStats, StatsHistory};

/// The simulation world.
///
/// Owns the grid, both population stores and the reverse occupancy index
/// for the duration of a run; planner and resolver borrow them per phase.
pub struct World {
    pub grid: Grid,
    pub rabbits: Population,
    pub foxes: Population,
    /// Rock positions in input order, internal (x, y) convention
    pub rocks: Vec<Pos>,
    pub occupants: OccupantIndex,

    /// Logical clock, incremented once after both species phases
    pub generation: u32,
    pub rules: RuleSettings,

    pub stats: GenerationStats,
    pub stats_history: StatsHistory,
}

impl World {
    /// Build a world from a parsed scenario.
    ///
    /// The scenario is already validated (in bounds, no duplicates), so
    /// placement cannot fail here.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut grid = Grid::new(scenario.rows, scenario.cols);
        let mut occupants = OccupantIndex::new(scenario.rows, scenario.cols);
        let mut rabbits = Population::new(Species::Rabbit);
        let mut foxes = Population::new(Species::Fox);
        let mut rocks = Vec::new();

        for placement in &scenario.placements {
            // External (row, col) becomes internal (x = col, y = row)
            let x = placement.col;
            let y = placement.row;
            match placement.kind {
                EntityKind::Rock => {
                    grid.set(x, y, Cell::Rock);
                    rocks.push((x, y));
                }
                EntityKind::Rabbit => {
                    let index = rabbits.push(Animal::new(x, y, Species::Rabbit));
                    grid.set(x, y, Cell::Rabbit);
                    occupants.set(
                        x,
                        y,
                        Occupant {
                            species: Species::Rabbit,
                            index,
                        },
                    );
                }
                EntityKind::Fox => {
                    let index = foxes.push(Animal::new(x, y, Species::Fox));
                    grid.set(x, y, Cell::Fox);
                    occupants.set(
                        x,
                        y,
                        Occupant {
                            species: Species::Fox,
                            index,
                        },
                    );
                }
            }
        }

        Self {
            grid,
            rabbits,
            foxes,
            rocks,
            occupants,
            generation: 0,
            rules: scenario.rules.clone(),
            stats: GenerationStats::new(),
            stats_history: StatsHistory::new(),
        }
    }

    /// Build a world from a randomly generated scenario, reproducible for
    /// a given seed
    pub fn random_with_seed(settings: &Settings, seed: u64) -> Self {
        Self::from_scenario(&Scenario::random(settings, seed))
    }

    /// Advance one full generation: rabbit phase, then fox phase on the
    /// post-rabbit grid, then the clock.
    pub fn step(&mut self) {
        let rabbit_outcome = resolver::advance_rabbits(
            &mut self.grid,
            &mut self.occupants,
            &mut self.rabbits,
            &self.rules,
            self.generation,
        );
        let fox_outcome = resolver::advance_foxes(
            &mut self.grid,
            &mut self.occupants,
            &mut self.foxes,
            &mut self.rabbits,
            &self.rules,
            self.generation,
        );

        self.generation += 1;
        self.update_stats(&rabbit_outcome, &fox_outcome);

        debug_assert_eq!(self.check_consistency(), Ok(()));
    }

    /// Run the simulation for the given number of generations
    pub fn run(&mut self, generations: u32) {
        for _ in 0..generations {
            self.step();
        }
    }

    fn update_stats(&mut self, rabbit_outcome: &PhaseOutcome, fox_outcome: &PhaseOutcome) {
        self.stats = GenerationStats {
            generation: self.generation,
            rabbits: self.rabbits.alive_count(),
            foxes: self.foxes.alive_count(),
            rocks: self.rocks.len(),
            rabbit_births: rabbit_outcome.births,
            fox_births: fox_outcome.births,
            collision_deaths: rabbit_outcome.collision_deaths + fox_outcome.collision_deaths,
            starvation_deaths: fox_outcome.starvation_deaths,
            predation_deaths: fox_outcome.predation_deaths,
        };
        self.stats_history.record(self.stats.clone());
    }

    /// Rocks plus living animals of both species
    pub fn survivor_count(&self) -> usize {
        self.rocks.len() + self.rabbits.alive_count() + self.foxes.alive_count()
    }

    /// True when no animal of either species is left
    pub fn is_extinct(&self) -> bool {
        self.rabbits.alive_count() == 0 && self.foxes.alive_count() == 0
    }

    /// Verify the global invariant: every living animal sits on a cell
    /// carrying its species marker and its occupancy-index entry, every
    /// occupied cell maps back to exactly one living animal, and rocks are
    /// untouched.
    ///
    /// A failure here is a programming error, not a user-facing condition;
    /// `step` checks it with `debug_assert!` and tests call it directly.
    pub fn check_consistency(&self) -> Result<(), String> {
        for (population, marker) in [(&self.rabbits, Cell::Rabbit), (&self.foxes, Cell::Fox)] {
            let species = population.species();
            for (index, animal) in population.as_slice().iter().enumerate() {
                if !animal.alive {
                    continue;
                }
                if !self.grid.in_bounds(animal.x, animal.y) {
                    return Err(format!(
                        "{:?} {} out of bounds at ({}, {})",
                        species, index, animal.x, animal.y
                    ));
                }
                if self.grid.get(animal.x, animal.y) != marker {
                    return Err(format!(
                        "{:?} {} at ({}, {}) sits on {:?}",
                        species,
                        index,
                        animal.x,
                        animal.y,
                        self.grid.get(animal.x, animal.y)
                    ));
                }
                match self.occupants.get(animal.x, animal.y) {
                    Some(occ) if occ.species == species && occ.index == index => {}
                    other => {
                        return Err(format!(
                            "occupant index at ({}, {}) is {:?}, expected {:?} {}",
                            animal.x, animal.y, other, species, index
                        ));
                    }
                }
            }
        }

        for &(x, y) in &self.rocks {
            if self.grid.get(x, y) != Cell::Rock {
                return Err(format!("rock at ({}, {}) was overwritten", x, y));
            }
        }

        // Cell counts rule out stale markers for cells no animal claims
        if self.grid.count(Cell::Rabbit) != self.rabbits.alive_count() {
            return Err("rabbit cell count does not match living rabbits".to_string());
        }
        if self.grid.count(Cell::Fox) != self.foxes.alive_count() {
            return Err("fox cell count does not match living foxes".to_string());
        }
        if self.grid.count(Cell::Rock) != self.rocks.len() {
            return Err("rock cell count does not match rock list".to_string());
        }

        Ok(())
    }
}
