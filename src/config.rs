//! Configuration for simulation runs.
//!
//! Supports YAML settings files with sensible defaults. The scenario text
//! format stays the canonical simulation input; settings drive generated
//! worlds, benchmarks and the `init` subcommand.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub rules: RuleSettings,
    pub world: WorldSettings,
    pub run: RunSettings,
    #[serde(default)]
    pub seeding: SeedingSettings,
}

/// The three numeric thresholds of the rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Breeding age a rabbit needs to reproduce on a successful move
    pub rabbit_reproduction: u32,
    /// Breeding age a fox needs to reproduce
    pub fox_reproduction: u32,
    /// Hunger at which a fox starves unless a rabbit is adjacent
    pub fox_starvation: u32,
}

/// Grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    pub rows: usize,
    pub cols: usize,
}

/// Run control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSettings {
    /// Number of generations to simulate
    pub generations: u32,
}

/// Entity counts for randomly generated worlds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingSettings {
    pub rocks: usize,
    pub rabbits: usize,
    pub foxes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: RuleSettings::default(),
            world: WorldSettings::default(),
            run: RunSettings::default(),
            seeding: SeedingSettings::default(),
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            rabbit_reproduction: 3,
            fox_reproduction: 6,
            fox_starvation: 4,
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self { rows: 20, cols: 20 }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { generations: 100 }
    }
}

impl Default for SeedingSettings {
    fn default() -> Self {
        Self {
            rocks: 20,
            rabbits: 60,
            foxes: 12,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.rows == 0 || self.world.cols == 0 {
            return Err("grid dimensions must be > 0".to_string());
        }
        if self.world.rows > 10_000 || self.world.cols > 10_000 {
            return Err("grid dimensions must be <= 10000".to_string());
        }
        let cells = self.world.rows * self.world.cols;
        let entities = self.seeding.rocks + self.seeding.rabbits + self.seeding.foxes;
        if entities > cells {
            return Err(format!(
                "seeding places {} entities on a {} cell grid",
                entities, cells
            ));
        }
        if self.rules.fox_starvation == 0 {
            return Err("fox_starvation must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings::default();
        let yaml = serde_yaml::to_string(&settings).unwrap();
        let loaded: Settings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(settings.world.rows, loaded.world.rows);
        assert_eq!(settings.rules.fox_starvation, loaded.rules.fox_starvation);
    }

    #[test]
    fn test_overfull_seeding_rejected() {
        let mut settings = Settings::default();
        settings.world.rows = 2;
        settings.world.cols = 2;
        assert!(settings.validate().is_err());
    }
}
