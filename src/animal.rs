//! Animal records and the per-species population store.

use crate::grid::{Cell, Pos};

/// The two animal species sharing the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    Rabbit,
    Fox,
}

impl Species {
    /// Grid marker for a cell occupied by this species
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Species::Rabbit => Cell::Rabbit,
            Species::Fox => Cell::Fox,
        }
    }
}

/// A single animal.
///
/// `hunger` is meaningful for foxes only and stays 0 for rabbits. Records
/// are mutated in place each generation and marked dead rather than removed,
/// so population indices stay stable within a generation.
#[derive(Clone, Debug)]
pub struct Animal {
    pub x: i32,
    pub y: i32,
    pub species: Species,
    /// Generations survived since the last reproduction
    pub breed_age: u32,
    /// Generations since the last meal (foxes only)
    pub hunger: u32,
    pub alive: bool,
}

impl Animal {
    /// Create a newborn animal at the given position
    pub fn new(x: i32, y: i32, species: Species) -> Self {
        Self {
            x,
            y,
            species,
            breed_age: 0,
            hunger: 0,
            alive: true,
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        (self.x, self.y)
    }
}

/// Append-only store of one species' animals.
///
/// Insertion order is the population index and decides tie-breaks during
/// collision resolution. Dead records are retained and skipped; offspring
/// append to the end and do not act in the generation that creates them.
#[derive(Clone, Debug)]
pub struct Population {
    species: Species,
    animals: Vec<Animal>,
}

impl Population {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            animals: Vec::new(),
        }
    }

    #[inline]
    pub fn species(&self) -> Species {
        self.species
    }

    /// Append an animal, returning its population index
    pub fn push(&mut self, animal: Animal) -> usize {
        debug_assert_eq!(animal.species, self.species);
        self.animals.push(animal);
        self.animals.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Animal {
        &self.animals[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut Animal {
        &mut self.animals[index]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Animal] {
        &self.animals
    }

    /// Indices of living animals, in population order
    pub fn alive_indices(&self) -> Vec<usize> {
        self.animals
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(|(i, _)| i)
            .collect()
    }

    /// Living animals, in population order
    pub fn alive(&self) -> impl Iterator<Item = &Animal> {
        self.animals.iter().filter(|a| a.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.animals.iter().filter(|a| a.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newborn_counters_start_at_zero() {
        let animal = Animal::new(3, 4, Species::Fox);
        assert_eq!(animal.breed_age, 0);
        assert_eq!(animal.hunger, 0);
        assert!(animal.alive);
        assert_eq!(animal.pos(), (3, 4));
    }

    #[test]
    fn test_dead_records_keep_indices_stable() {
        let mut pop = Population::new(Species::Rabbit);
        pop.push(Animal::new(0, 0, Species::Rabbit));
        pop.push(Animal::new(1, 0, Species::Rabbit));
        pop.push(Animal::new(2, 0, Species::Rabbit));

        pop.get_mut(1).alive = false;

        assert_eq!(pop.len(), 3);
        assert_eq!(pop.alive_count(), 2);
        assert_eq!(pop.alive_indices(), vec![0, 2]);
        // The dead record is still addressable at its original index
        assert_eq!(pop.get(1).pos(), (1, 0));
    }

    #[test]
    fn test_push_returns_appended_index() {
        let mut pop = Population::new(Species::Fox);
        assert_eq!(pop.push(Animal::new(0, 0, Species::Fox)), 0);
        assert_eq!(pop.push(Animal::new(1, 1, Species::Fox)), 1);
    }
}
