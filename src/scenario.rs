//! Scenario boundary I/O: initial configuration parsing, random scenario
//! generation, and the final report.
//!
//! The external format uses `(row, column)` coordinates; the engine works
//! in `(x = column, y = row)`. The conversion happens here and only here.

use crate::config::{RuleSettings, Settings};
use crate::world::World;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use std::str::SplitWhitespace;

/// Entity tags accepted in a scenario file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Rock,
    Rabbit,
    Fox,
}

impl EntityKind {
    fn tag(self) -> &'static str {
        match self {
            EntityKind::Rock => "ROCK",
            EntityKind::Rabbit => "RABBIT",
            EntityKind::Fox => "FOX",
        }
    }
}

/// One entity placement in external `(row, column)` coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub kind: EntityKind,
    pub row: i32,
    pub col: i32,
}

/// Parsed initial configuration.
///
/// Header: the three rule thresholds, then generation count, row count,
/// column count and entity count, followed by one `TAG row col` record per
/// entity.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub rules: RuleSettings,
    pub generations: u32,
    pub rows: usize,
    pub cols: usize,
    pub placements: Vec<Placement>,
}

impl Scenario {
    /// Parse a scenario from its text form, failing fast on malformed
    /// input so the engine never sees it.
    pub fn parse(input: &str) -> Result<Self, ScenarioError> {
        let mut tokens = input.split_whitespace();

        let rabbit_reproduction = next_u32(&mut tokens, "rabbit reproduction threshold")?;
        let fox_reproduction = next_u32(&mut tokens, "fox reproduction threshold")?;
        let fox_starvation = next_u32(&mut tokens, "fox starvation threshold")?;
        let generations = next_u32(&mut tokens, "generation count")?;
        let rows = next_u32(&mut tokens, "row count")? as usize;
        let cols = next_u32(&mut tokens, "column count")? as usize;
        let entity_count = next_u32(&mut tokens, "entity count")? as usize;

        if rows == 0 || cols == 0 {
            return Err(ScenarioError::EmptyGrid { rows, cols });
        }

        let mut placements = Vec::with_capacity(entity_count);
        let mut occupied: HashSet<(i32, i32)> = HashSet::new();
        for _ in 0..entity_count {
            let tag = tokens
                .next()
                .ok_or(ScenarioError::MissingField("entity tag"))?;
            let kind = match tag {
                "ROCK" => EntityKind::Rock,
                "RABBIT" => EntityKind::Rabbit,
                "FOX" => EntityKind::Fox,
                other => return Err(ScenarioError::UnknownTag(other.to_string())),
            };
            let row = next_u32(&mut tokens, "entity row")? as i32;
            let col = next_u32(&mut tokens, "entity column")? as i32;

            if row >= rows as i32 || col >= cols as i32 {
                return Err(ScenarioError::OutOfBounds { row, col });
            }
            if !occupied.insert((row, col)) {
                return Err(ScenarioError::DuplicateCell { row, col });
            }
            placements.push(Placement { kind, row, col });
        }

        Ok(Self {
            rules: RuleSettings {
                rabbit_reproduction,
                fox_reproduction,
                fox_starvation,
            },
            generations,
            rows,
            cols,
            placements,
        })
    }

    /// Read and parse a scenario file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Generate a random scenario from settings with a seeded RNG, placing
    /// every entity on a distinct cell.
    pub fn random(settings: &Settings, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rows = settings.world.rows;
        let cols = settings.world.cols;

        let mut cells: Vec<(i32, i32)> = (0..rows as i32)
            .flat_map(|row| (0..cols as i32).map(move |col| (row, col)))
            .collect();
        cells.shuffle(&mut rng);

        let mut placements = Vec::new();
        let mut take = |kind: EntityKind, count: usize, cells: &mut Vec<(i32, i32)>| {
            for _ in 0..count {
                // Settings validation guarantees enough cells
                let (row, col) = cells.pop().expect("seeding exceeds grid capacity");
                placements.push(Placement { kind, row, col });
            }
        };
        take(EntityKind::Rock, settings.seeding.rocks, &mut cells);
        take(EntityKind::Rabbit, settings.seeding.rabbits, &mut cells);
        take(EntityKind::Fox, settings.seeding.foxes, &mut cells);

        Self {
            rules: settings.rules.clone(),
            generations: settings.run.generations,
            rows,
            cols,
            placements,
        }
    }

    /// Render the scenario back into its text form
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} {}",
            self.rules.rabbit_reproduction, self.rules.fox_reproduction, self.rules.fox_starvation
        );
        let _ = writeln!(
            out,
            "{} {} {} {}",
            self.generations,
            self.rows,
            self.cols,
            self.placements.len()
        );
        for p in &self.placements {
            let _ = writeln!(out, "{} {} {}", p.kind.tag(), p.row, p.col);
        }
        out
    }
}

fn next_u32(tokens: &mut SplitWhitespace, field: &'static str) -> Result<u32, ScenarioError> {
    let token = tokens.next().ok_or(ScenarioError::MissingField(field))?;
    token.parse().map_err(|_| ScenarioError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

/// Final population report: thresholds, a literal `0` placeholder, the grid
/// dimensions and the surviving entity count, then one line per rock and
/// per living animal, grouped by species in population-store order.
pub fn final_report(world: &World) -> String {
    let survivors = world.survivor_count();
    let rules = &world.rules;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} 0 {} {} {}",
        rules.rabbit_reproduction,
        rules.fox_reproduction,
        rules.fox_starvation,
        world.grid.rows(),
        world.grid.cols(),
        survivors
    );
    for &(x, y) in &world.rocks {
        let _ = writeln!(out, "ROCK {} {}", y, x);
    }
    for animal in world.rabbits.alive() {
        let _ = writeln!(out, "RABBIT {} {}", animal.y, animal.x);
    }
    for animal in world.foxes.alive() {
        let _ = writeln!(out, "FOX {} {}", animal.y, animal.x);
    }
    out
}

/// Errors from reading or validating a scenario
#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    MissingField(&'static str),
    InvalidNumber { field: &'static str, value: String },
    UnknownTag(String),
    EmptyGrid { rows: usize, cols: usize },
    OutOfBounds { row: i32, col: i32 },
    DuplicateCell { row: i32, col: i32 },
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::MissingField(field) => write!(f, "missing field: {}", field),
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid number for {}: {:?}", field, value)
            }
            Self::UnknownTag(tag) => write!(f, "unknown entity tag: {:?}", tag),
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must be non-empty, got {}x{}", rows, cols)
            }
            Self::OutOfBounds { row, col } => {
                write!(f, "placement out of bounds: row {}, col {}", row, col)
            }
            Self::DuplicateCell { row, col } => {
                write!(f, "duplicate placement at row {}, col {}", row, col)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
        3 6 4
        10 4 5 3
        ROCK 0 0
        RABBIT 1 2
        FOX 3 4";

    #[test]
    fn test_parse_sample_scenario() {
        let scenario = Scenario::parse(SAMPLE).unwrap();
        assert_eq!(scenario.rules.rabbit_reproduction, 3);
        assert_eq!(scenario.rules.fox_reproduction, 6);
        assert_eq!(scenario.rules.fox_starvation, 4);
        assert_eq!(scenario.generations, 10);
        assert_eq!(scenario.rows, 4);
        assert_eq!(scenario.cols, 5);
        assert_eq!(scenario.placements.len(), 3);
        assert_eq!(
            scenario.placements[1],
            Placement {
                kind: EntityKind::Rabbit,
                row: 1,
                col: 2
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let input = "1 1 1 1 2 2 1 WOLF 0 0";
        assert!(matches!(
            Scenario::parse(input),
            Err(ScenarioError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_bounds_placement() {
        let input = "1 1 1 1 2 2 1 ROCK 2 0";
        assert!(matches!(
            Scenario::parse(input),
            Err(ScenarioError::OutOfBounds { row: 2, col: 0 })
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_placement() {
        let input = "1 1 1 1 2 2 2 ROCK 0 0 RABBIT 0 0";
        assert!(matches!(
            Scenario::parse(input),
            Err(ScenarioError::DuplicateCell { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_input() {
        assert!(matches!(
            Scenario::parse("1 1 1 1 2"),
            Err(ScenarioError::MissingField(_))
        ));
    }

    #[test]
    fn test_random_scenario_places_distinct_cells() {
        let mut settings = Settings::default();
        settings.world.rows = 8;
        settings.world.cols = 8;
        settings.seeding.rocks = 10;
        settings.seeding.rabbits = 20;
        settings.seeding.foxes = 5;

        let scenario = Scenario::random(&settings, 42);
        assert_eq!(scenario.placements.len(), 35);

        let cells: HashSet<(i32, i32)> = scenario
            .placements
            .iter()
            .map(|p| (p.row, p.col))
            .collect();
        assert_eq!(cells.len(), 35);
        assert!(scenario
            .placements
            .iter()
            .all(|p| p.row < 8 && p.col < 8 && p.row >= 0 && p.col >= 0));
    }

    #[test]
    fn test_random_scenario_is_seed_deterministic() {
        let settings = Settings::default();
        let a = Scenario::random(&settings, 7);
        let b = Scenario::random(&settings, 7);
        assert_eq!(a.to_text(), b.to_text());
    }

    #[test]
    fn test_text_roundtrip() {
        let scenario = Scenario::parse(SAMPLE).unwrap();
        let reparsed = Scenario::parse(&scenario.to_text()).unwrap();
        assert_eq!(reparsed.to_text(), scenario.to_text());
    }
}
