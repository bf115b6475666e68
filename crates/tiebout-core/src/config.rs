//! Configuration loading and typed config structures for the Tiebout simulation.
//!
//! The run configuration lives in `tiebout-config.yaml`. Every section and
//! field is optional; missing values fall back to the defaults below, which
//! reproduce the classic five-resident, five-by-five setup.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid and seed settings.
    #[serde(default)]
    pub world: WorldConfig,

    /// Resident count and vector generation.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Stopping conditions.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where to write results.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `TIEBOUT_SEED` overrides `world.seed`
    /// - `TIEBOUT_MAX_STEPS` overrides `simulation.max_steps`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override selected values from environment variables when set.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = env_u64("TIEBOUT_SEED") {
            self.world.seed = seed;
        }
        if let Some(max_steps) = env_u64("TIEBOUT_MAX_STEPS") {
            self.simulation.max_steps = max_steps;
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    match val.trim().parse::<u64>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(variable = name, value = %val, %err, "Ignoring invalid environment override");
            None
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable run name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for placement, tie-breaks and vector generation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Grid rows.
    #[serde(default = "default_grid_side")]
    pub height: u32,

    /// Grid columns.
    #[serde(default = "default_grid_side")]
    pub width: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            height: default_grid_side(),
            width: default_grid_side(),
        }
    }
}

/// Population configuration.
///
/// Preference and spending vectors are drawn as whole numbers uniformly
/// from `value_min..=value_max`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of residents.
    #[serde(default = "default_residents")]
    pub residents: u32,

    /// Dimensionality of preference and spending vectors.
    #[serde(default = "default_dimensions")]
    pub dimensions: u32,

    /// Smallest generated value.
    #[serde(default = "default_value_min")]
    pub value_min: u32,

    /// Largest generated value.
    #[serde(default = "default_value_max")]
    pub value_max: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            residents: default_residents(),
            dimensions: default_dimensions(),
            value_min: default_value_min(),
            value_max: default_value_max(),
        }
    }
}

/// Stopping conditions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum rounds to run; 0 means unlimited.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// The model stops once a round's aggregate gap falls below this.
    #[serde(default = "default_min_gap")]
    pub min_gap: f64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            min_gap: default_min_gap(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Write the round history as JSON to this path when set.
    #[serde(default)]
    pub history_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Mini Tiebout".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_grid_side() -> u32 {
    5
}

const fn default_residents() -> u32 {
    5
}

const fn default_dimensions() -> u32 {
    1
}

const fn default_value_min() -> u32 {
    1
}

const fn default_value_max() -> u32 {
    20
}

const fn default_max_steps() -> u64 {
    100
}

const fn default_min_gap() -> f64 {
    5.0
}

fn default_log_level() -> String {
    "info".to_owned()
}
