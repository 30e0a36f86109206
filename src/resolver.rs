//! Conflict resolution and state mutation for one species phase.
//!
//! Consumes planned destinations, resolves multi-claimant collisions,
//! applies moves, performs predation and reproduction, and keeps the grid
//! and the reverse occupancy index in sync. This pass is strictly
//! sequential: winner selection and grid writes are globally ordered.

use crate::animal::{Animal, Population, Species};
use crate::config::RuleSettings;
use crate::grid::{Cell, Grid, Occupant, OccupantIndex, Pos};
use crate::planner::{self, PlannedMove};
use std::collections::BTreeMap;

/// Counters for one species phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub births: usize,
    pub collision_deaths: usize,
    pub starvation_deaths: usize,
    pub predation_deaths: usize,
}

/// Group planned moves by destination cell.
///
/// The map is ordered by (x, y) ascending, which fixes the iteration order
/// of destination groups and with it the append order of rabbit offspring.
/// Claimants within a group keep population-index order.
fn group_by_destination(plans: Vec<PlannedMove>) -> BTreeMap<Pos, Vec<PlannedMove>> {
    let mut groups: BTreeMap<Pos, Vec<PlannedMove>> = BTreeMap::new();
    for plan in plans {
        groups.entry(plan.dest).or_default().push(plan);
    }
    groups
}

/// Rabbit collision winner: highest breeding age, first index breaks ties
fn select_rabbit_winner(claimants: &[PlannedMove], rabbits: &Population) -> usize {
    let mut winner = claimants[0].index;
    for claimant in &claimants[1..] {
        if rabbits.get(claimant.index).breed_age > rabbits.get(winner).breed_age {
            winner = claimant.index;
        }
    }
    winner
}

/// Fox collision winner: highest breeding age, then lowest hunger, then
/// first index
fn select_fox_winner(claimants: &[PlannedMove], foxes: &Population) -> usize {
    let mut winner = claimants[0].index;
    for claimant in &claimants[1..] {
        let a = foxes.get(claimant.index);
        let b = foxes.get(winner);
        if a.breed_age > b.breed_age || (a.breed_age == b.breed_age && a.hunger < b.hunger) {
            winner = claimant.index;
        }
    }
    winner
}

/// Run the full rabbit phase for one generation: plan, resolve collisions,
/// move, and spawn offspring.
pub fn advance_rabbits(
    grid: &mut Grid,
    occupants: &mut OccupantIndex,
    rabbits: &mut Population,
    rules: &RuleSettings,
    generation: u32,
) -> PhaseOutcome {
    let plans = planner::plan_moves(grid, rabbits, generation);
    let groups = group_by_destination(plans);

    // Reproduction marking: a rabbit reproduces only if it actually moves
    // and its breeding age has reached the threshold. The pending offspring
    // site is the pre-move position, recorded even for animals that go on
    // to lose their collision.
    let mut will_reproduce = vec![false; rabbits.len()];
    let mut offspring_sites: Vec<Pos> = Vec::new();
    for claimants in groups.values() {
        for claimant in claimants {
            let moved = claimant.dest != claimant.from;
            if moved && rabbits.get(claimant.index).breed_age >= rules.rabbit_reproduction {
                will_reproduce[claimant.index] = true;
                offspring_sites.push(claimant.from);
            }
        }
    }

    // Clear all old rabbit occupancy before any winner is written
    for index in rabbits.alive_indices() {
        let (x, y) = rabbits.get(index).pos();
        grid.set(x, y, Cell::Empty);
        occupants.clear(x, y);
    }

    let mut collision_deaths = 0;
    for (&(dest_x, dest_y), claimants) in &groups {
        let winner = if claimants.len() == 1 {
            claimants[0].index
        } else {
            let winner = select_rabbit_winner(claimants, rabbits);
            for claimant in claimants {
                if claimant.index != winner {
                    rabbits.get_mut(claimant.index).alive = false;
                    collision_deaths += 1;
                }
            }
            winner
        };

        let animal = rabbits.get_mut(winner);
        if will_reproduce[winner] {
            animal.breed_age = 0;
        } else {
            animal.breed_age += 1;
        }
        animal.x = dest_x;
        animal.y = dest_y;
        grid.set(dest_x, dest_y, Cell::Rabbit);
        occupants.set(
            dest_x,
            dest_y,
            Occupant {
                species: Species::Rabbit,
                index: winner,
            },
        );
    }

    let births = spawn_offspring(grid, occupants, rabbits, &offspring_sites);

    PhaseOutcome {
        births,
        collision_deaths,
        ..PhaseOutcome::default()
    }
}

/// Run the full fox phase for one generation.
///
/// Pre-steps run in fixed order before any movement: hunger increment,
/// starvation against the pre-move adjacency, then reproduction marking
/// with the breeding-age reset applied immediately.
pub fn advance_foxes(
    grid: &mut Grid,
    occupants: &mut OccupantIndex,
    foxes: &mut Population,
    rabbits: &mut Population,
    rules: &RuleSettings,
    generation: u32,
) -> PhaseOutcome {
    for index in foxes.alive_indices() {
        foxes.get_mut(index).hunger += 1;
    }

    // Starvation: a fox at or past the threshold survives only if a rabbit
    // is adjacent to its current position. Starved foxes are out of the
    // generation entirely: no planning, no collisions, no reproduction.
    let mut starved: Vec<usize> = Vec::new();
    for index in foxes.alive_indices() {
        let animal = foxes.get(index);
        let can_eat = !grid.rabbit_neighbors(animal.x, animal.y).is_empty();
        if animal.hunger >= rules.fox_starvation && !can_eat {
            starved.push(index);
        }
    }
    for &index in &starved {
        foxes.get_mut(index).alive = false;
    }

    // Reproduction marking happens before movement; the age reset is
    // applied now so collision ranking sees the reset value.
    let mut reproduced = vec![false; foxes.len()];
    let mut offspring_sites: Vec<Pos> = Vec::new();
    for index in foxes.alive_indices() {
        let animal = foxes.get_mut(index);
        if animal.breed_age >= rules.fox_reproduction {
            offspring_sites.push(animal.pos());
            animal.breed_age = 0;
            reproduced[index] = true;
        }
    }

    let plans = planner::plan_moves(grid, foxes, generation);
    let groups = group_by_destination(plans);

    // Clear old occupancy for every fox that entered this phase alive,
    // including the ones that just starved. Cells of foxes dead since
    // earlier generations were never theirs to clear.
    for index in foxes.alive_indices() {
        let (x, y) = foxes.get(index).pos();
        grid.set(x, y, Cell::Empty);
        occupants.clear(x, y);
    }
    for &index in &starved {
        let (x, y) = foxes.get(index).pos();
        grid.set(x, y, Cell::Empty);
        occupants.clear(x, y);
    }

    let mut collision_deaths = 0;
    let mut predation_deaths = 0;
    for (&(dest_x, dest_y), claimants) in &groups {
        // Predation: the rabbit dies once per destination group, before
        // winner selection; only the winner gets the hunger reset.
        let ate = match occupants.get(dest_x, dest_y) {
            Some(occ) if occ.species == Species::Rabbit => {
                rabbits.get_mut(occ.index).alive = false;
                occupants.clear(dest_x, dest_y);
                predation_deaths += 1;
                true
            }
            _ => false,
        };

        let winner = if claimants.len() == 1 {
            claimants[0].index
        } else {
            let winner = select_fox_winner(claimants, foxes);
            for claimant in claimants {
                if claimant.index != winner {
                    foxes.get_mut(claimant.index).alive = false;
                    collision_deaths += 1;
                }
            }
            winner
        };

        let animal = foxes.get_mut(winner);
        if ate {
            animal.hunger = 0;
        }
        animal.x = dest_x;
        animal.y = dest_y;
        if !reproduced[winner] {
            animal.breed_age += 1;
        }
        grid.set(dest_x, dest_y, Cell::Fox);
        occupants.set(
            dest_x,
            dest_y,
            Occupant {
                species: Species::Fox,
                index: winner,
            },
        );
    }

    let births = spawn_offspring(grid, occupants, foxes, &offspring_sites);

    PhaseOutcome {
        births,
        collision_deaths,
        starvation_deaths: starved.len(),
        predation_deaths,
    }
}

/// Spawn one newborn per pending site that is still empty after all
/// movement for the species has been applied. A site reoccupied in the
/// meantime forfeits its birth; nothing is deferred.
fn spawn_offspring(
    grid: &mut Grid,
    occupants: &mut OccupantIndex,
    population: &mut Population,
    sites: &[Pos],
) -> usize {
    let species = population.species();
    let mut births = 0;
    for &(x, y) in sites {
        if grid.get(x, y) == Cell::Empty {
            let index = population.push(Animal::new(x, y, species));
            grid.set(x, y, species.cell());
            occupants.set(x, y, Occupant { species, index });
            births += 1;
        }
    }
    births
}
