//! Grid of cell states and the reverse occupancy index.

use crate::animal::Species;

/// Internal position convention: `(x = column, y = row)`.
pub type Pos = (i32, i32);

/// Neighbor offsets in fixed clockwise order: North, East, South, West.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// State of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Rock,
    Rabbit,
    Fox,
}

/// Fixed R x C array of cell states.
///
/// The grid is the single source of truth for "what occupies (x, y) right
/// now" and must always agree with the populations' alive records. Rocks are
/// set once at initialization and never change.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True iff `0 <= x < cols` and `0 <= y < rows`
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.cols && y >= 0 && (y as usize) < self.rows
    }

    /// Cell state at an in-bounds position
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        debug_assert!(self.in_bounds(x, y));
        self.cells[y as usize * self.cols + x as usize]
    }

    /// Overwrite the cell state at an in-bounds position
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        debug_assert!(self.in_bounds(x, y));
        self.cells[y as usize * self.cols + x as usize] = cell;
    }

    /// In-bounds neighbors of `(x, y)` in fixed N, E, S, W order
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<Pos> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| self.in_bounds(nx, ny))
            .collect()
    }

    /// Neighbors whose cell is empty, in fixed N, E, S, W order
    pub fn empty_neighbors(&self, x: i32, y: i32) -> Vec<Pos> {
        self.neighbors_matching(x, y, Cell::Empty)
    }

    /// Neighbors whose cell holds a rabbit, in fixed N, E, S, W order
    pub fn rabbit_neighbors(&self, x: i32, y: i32) -> Vec<Pos> {
        self.neighbors_matching(x, y, Cell::Rabbit)
    }

    fn neighbors_matching(&self, x: i32, y: i32, wanted: Cell) -> Vec<Pos> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .filter(|&(nx, ny)| self.in_bounds(nx, ny) && self.get(nx, ny) == wanted)
            .collect()
    }

    /// Count cells currently in the given state
    pub fn count(&self, wanted: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == wanted).count()
    }
}

/// Identity of the animal occupying a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub species: Species,
    /// Index into the species' population store
    pub index: usize,
}

/// Reverse index from position to occupant identity.
///
/// Maintained incrementally alongside grid mutations so diagnostics and
/// predation lookups never scan the population stores. Rocks are not
/// tracked here; only living animals are.
#[derive(Clone, Debug)]
pub struct OccupantIndex {
    rows: usize,
    cols: usize,
    slots: Vec<Option<Occupant>>,
}

impl OccupantIndex {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            slots: vec![None; rows * cols],
        }
    }

    /// Occupant at a position, if any living animal is there
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Occupant> {
        debug_assert!(x >= 0 && (x as usize) < self.cols && y >= 0 && (y as usize) < self.rows);
        self.slots[y as usize * self.cols + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, occupant: Occupant) {
        self.slots[y as usize * self.cols + x as usize] = Some(occupant);
    }

    #[inline]
    pub fn clear(&mut self, x: i32, y: i32) {
        self.slots[y as usize * self.cols + x as usize] = None;
    }
}
