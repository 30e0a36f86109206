//! Deterministic movement planning.
//!
//! Planning is pure with respect to shared state: each destination depends
//! only on the individual's own position, the read-only grid, and the
//! generation counter. That makes the pass reproducible without a stateful
//! RNG and safe to run in parallel before any mutation happens.

use crate::animal::{Population, Species};
use crate::grid::{Grid, Pos};
use rayon::prelude::*;

/// A planned move for one living animal.
///
/// The pre-move position is captured here because offspring placement uses
/// it after the animal has already been relocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    /// Index into the species' population store
    pub index: usize,
    pub from: Pos,
    pub dest: Pos,
}

/// Plan destinations for every living animal of a population, in parallel.
///
/// The result is ordered by population index (rayon's collect preserves
/// input order), so downstream grouping is deterministic.
pub fn plan_moves(grid: &Grid, population: &Population, generation: u32) -> Vec<PlannedMove> {
    let species = population.species();
    population
        .alive_indices()
        .into_par_iter()
        .map(|index| {
            let animal = population.get(index);
            let from = animal.pos();
            let dest = match species {
                Species::Rabbit => rabbit_destination(grid, generation, from),
                Species::Fox => fox_destination(grid, generation, from),
            };
            PlannedMove { index, from, dest }
        })
        .collect()
}

/// Destination for a rabbit: a pseudo-randomly chosen empty neighbor, or the
/// current cell when boxed in.
pub fn rabbit_destination(grid: &Grid, generation: u32, (x, y): Pos) -> Pos {
    pick_empty(&grid.empty_neighbors(x, y), generation, x, y).unwrap_or((x, y))
}

/// Destination for a fox: the first adjacent rabbit in N, E, S, W order if
/// any (predation intent), otherwise the same empty-cell rule as rabbits.
///
/// Only the first adjacent rabbit is ever targeted, even when several are
/// adjacent. That asymmetry is part of the rule set, not a simplification.
pub fn fox_destination(grid: &Grid, generation: u32, (x, y): Pos) -> Pos {
    if let Some(&prey) = grid.rabbit_neighbors(x, y).first() {
        prey
    } else {
        rabbit_destination(grid, generation, (x, y))
    }
}

/// `choices[(generation + x + y) mod P]` - deterministic for a given
/// generation and position.
fn pick_empty(choices: &[Pos], generation: u32, x: i32, y: i32) -> Option<Pos> {
    if choices.is_empty() {
        None
    } else {
        let index = (generation as usize + x as usize + y as usize) % choices.len();
        Some(choices[index])
    }
}
