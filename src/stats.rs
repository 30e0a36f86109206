//! Per-generation statistics tracking.

use serde::{Deserialize, Serialize};

/// Statistics snapshot for one generation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation the snapshot was taken after
    pub generation: u32,
    /// Living rabbits
    pub rabbits: usize,
    /// Living foxes
    pub foxes: usize,
    /// Rocks (constant for a run)
    pub rocks: usize,
    /// Rabbits born this generation
    pub rabbit_births: usize,
    /// Foxes born this generation
    pub fox_births: usize,
    /// Animals lost to movement collisions this generation
    pub collision_deaths: usize,
    /// Foxes starved this generation
    pub starvation_deaths: usize,
    /// Rabbits eaten this generation
    pub predation_deaths: usize,
}

impl GenerationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total births this generation
    pub fn births(&self) -> usize {
        self.rabbit_births + self.fox_births
    }

    /// Total deaths this generation
    pub fn deaths(&self) -> usize {
        self.collision_deaths + self.starvation_deaths + self.predation_deaths
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "G:{:5} | Rabbits:{:6} | Foxes:{:5} | Born:{:4} | Clashed:{:4} | Starved:{:4} | Eaten:{:4}",
            self.generation,
            self.rabbits,
            self.foxes,
            self.births(),
            self.collision_deaths,
            self.starvation_deaths,
            self.predation_deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// One snapshot per generation
    pub snapshots: Vec<GenerationStats>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: GenerationStats) {
        self.snapshots.push(stats);
    }

    /// Population counts over time as (generation, rabbits, foxes)
    pub fn population_series(&self) -> Vec<(u32, usize, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.rabbits, s.foxes))
            .collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_contains_counts() {
        let stats = GenerationStats {
            generation: 7,
            rabbits: 42,
            foxes: 9,
            ..Default::default()
        };
        let summary = stats.summary();
        assert!(summary.contains("7"));
        assert!(summary.contains("42"));
        assert!(summary.contains("9"));
    }

    #[test]
    fn test_history_series() {
        let mut history = StatsHistory::new();
        for generation in 0..3 {
            history.record(GenerationStats {
                generation,
                rabbits: 10 + generation as usize,
                foxes: 5,
                ..Default::default()
            });
        }

        let series = history.population_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2], (2, 12, 5));
    }

    #[test]
    fn test_history_json_roundtrip() {
        let mut history = StatsHistory::new();
        history.record(GenerationStats {
            generation: 1,
            rabbits: 3,
            foxes: 2,
            predation_deaths: 1,
            ..Default::default()
        });

        let json = serde_json::to_string(&history).unwrap();
        let loaded: StatsHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.snapshots.len(), 1);
        assert_eq!(loaded.snapshots[0].predation_deaths, 1);
    }
}
