//! Diagnostic text rendering of the world state.
//!
//! Three panels per snapshot: cell occupancy, breeding ages, and fox
//! hunger. Diagnostics only; the persisted contract is the final report in
//! `scenario::final_report`.

use crate::animal::Species;
use crate::grid::Cell;
use crate::world::World;
use std::fmt::Write as _;

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Rock => '*',
        Cell::Rabbit => 'R',
        Cell::Fox => 'F',
    }
}

/// Render the three-panel snapshot for the world's current generation.
///
/// Per-cell animal lookups go through the reverse occupancy index, so the
/// cost is one probe per cell rather than a scan over every animal.
pub fn snapshot(world: &World) -> String {
    let rows = world.grid.rows();
    let cols = world.grid.cols();

    let mut out = String::new();
    let _ = writeln!(out, "Generation {}", world.generation);
    let _ = writeln!(out, "-------   ------- -------");

    for y in 0..rows as i32 {
        let mut occupancy = String::with_capacity(cols);
        let mut ages = String::with_capacity(cols);
        let mut hunger = String::with_capacity(cols);

        for x in 0..cols as i32 {
            let cell = world.grid.get(x, y);
            occupancy.push(glyph(cell));

            match world.occupants.get(x, y) {
                Some(occ) => {
                    let animal = match occ.species {
                        Species::Rabbit => world.rabbits.get(occ.index),
                        Species::Fox => world.foxes.get(occ.index),
                    };
                    let _ = write!(ages, "{}", animal.breed_age);
                    match occ.species {
                        Species::Rabbit => hunger.push('R'),
                        Species::Fox => {
                            let _ = write!(hunger, "{}", animal.hunger);
                        }
                    }
                }
                None => {
                    let blank = if cell == Cell::Rock { '*' } else { ' ' };
                    ages.push(blank);
                    hunger.push(blank);
                }
            }
        }

        let _ = writeln!(out, "|{}|   |{}| |{}|", occupancy, ages, hunger);
    }

    let _ = writeln!(out, "-------   ------- -------");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn test_snapshot_shows_markers_and_counters() {
        let scenario =
            Scenario::parse("1 1 9 1 2 3 3 ROCK 0 0 RABBIT 0 1 FOX 1 2").unwrap();
        let mut world = World::from_scenario(&scenario);
        world.foxes.get_mut(0).hunger = 3;
        world.rabbits.get_mut(0).breed_age = 2;

        let text = snapshot(&world);
        assert!(text.starts_with("Generation 0\n"));
        // Occupancy panel, row 0: rock, rabbit, empty
        assert!(text.contains("|*R |"));
        // Ages panel shows the rabbit's breeding age next to the rock
        assert!(text.contains("|*2 |"));
        // Hunger panel shows the fox's counter
        assert!(text.contains("3|"));
    }
}
