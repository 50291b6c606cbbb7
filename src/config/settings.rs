//! Configuration settings for the Game of Life simulation

use crate::game_of_life::Pattern;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub seeding: SeedingConfig,
    pub driver: DriverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub height: usize,
    pub width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Chance of each cell starting alive
    pub probability: f64,
    /// Fixed seed for reproducible runs; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Start from a centred built-in pattern instead of random cells
    #[serde(default)]
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Delay between generations while running
    pub interval_ms: u64,
    /// Stop after this many generations; run until interrupted when absent
    #[serde(default)]
    pub generations: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_grid: bool,
    /// Label printed grids with row and column numbers
    #[serde(default)]
    pub show_coords: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                height: 50,
                width: 100,
            },
            seeding: SeedingConfig {
                probability: 0.3,
                seed: None,
                pattern: None,
            },
            driver: DriverConfig {
                interval_ms: 100,
                generations: Some(100),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_grid: false,
                show_coords: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.height == 0 || self.grid.width == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.height,
                self.grid.width
            );
        }

        if !(0.0..=1.0).contains(&self.seeding.probability) {
            anyhow::bail!(
                "Seeding probability must be within [0, 1], got {}",
                self.seeding.probability
            );
        }

        if let Some(pattern) = self.seeding.pattern {
            pattern
                .centered(self.grid.height, self.grid.width)
                .with_context(|| format!("Pattern {:?} does not fit the grid", pattern))?;
        }

        Ok(())
    }

    /// Interval between generations while running
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.driver.interval_ms)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(probability) = cli_overrides.probability {
            self.seeding.probability = probability;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.seeding.pattern = Some(pattern);
        }
        if let Some(generations) = cli_overrides.generations {
            self.driver.generations = Some(generations);
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.driver.interval_ms = interval_ms;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub probability: Option<f64>,
    pub seed: Option<u64>,
    pub pattern: Option<Pattern>,
    pub generations: Option<usize>,
    pub interval_ms: Option<u64>,
}
