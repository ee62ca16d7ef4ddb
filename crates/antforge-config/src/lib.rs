//! Configuration system for AntForge.
//!
//! Load colony configuration from TOML or YAML files to tune a run
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use antforge_config::{ColonyConfig, DepositSchedule};
//!
//! let config = ColonyConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [colony]
//!     ant_count = 50
//!     iteration_count = 100
//!     beta = 3.0
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.colony.ant_count, 50);
//! assert_eq!(config.colony.evaporation_rate, 0.1);
//! assert_eq!(config.colony.deposit_schedule, DepositSchedule::PerAnt);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use antforge_config::ColonyConfig;
//!
//! let config = ColonyConfig::load("antforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use antforge_core::domain::{DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_EVAPORATION_RATE};
use antforge_core::RunParameters;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used by [`EnvironmentMode::Reproducible`] when no seed is configured.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Default pheromone level on every edge at run start.
pub const DEFAULT_INITIAL_PHEROMONE: f64 = 1.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main colony configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ColonyConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Colony parameters.
    #[serde(default)]
    pub colony: ColonyParams,
}

impl ColonyConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Replaces the colony parameters.
    pub fn with_colony(mut self, colony: ColonyParams) -> Self {
        self.colony = colony;
        self
    }

    /// Returns the seed the run should use, if any.
    ///
    /// An explicit seed always wins; reproducible modes fall back to
    /// [`DEFAULT_RANDOM_SEED`].
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::NonReproducible) => None,
            (None, _) => Some(DEFAULT_RANDOM_SEED),
        }
    }

    /// Builds run parameters for a matrix of `city_count` cities.
    ///
    /// # Examples
    ///
    /// ```
    /// use antforge_config::ColonyConfig;
    ///
    /// let params = ColonyConfig::default().run_parameters(4);
    /// assert_eq!(params.city_count, 4);
    /// assert_eq!(params.ant_count, 20);
    /// assert_eq!(params.beta, 2.0);
    /// ```
    pub fn run_parameters(&self, city_count: usize) -> RunParameters {
        RunParameters::new(
            city_count,
            self.colony.iteration_count,
            self.colony.ant_count,
        )
        .with_evaporation_rate(self.colony.evaporation_rate)
        .with_alpha(self.colony.alpha)
        .with_beta(self.colony.beta)
    }

    /// Checks settings that do not depend on the distance matrix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let colony = &self.colony;
        if !(colony.initial_pheromone.is_finite() && colony.initial_pheromone > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "initial_pheromone must be finite and positive, got {}",
                colony.initial_pheromone
            )));
        }
        if colony.construction == ConstructionMode::Parallel
            && colony.deposit_schedule == DepositSchedule::PerAnt
        {
            return Err(ConfigError::Invalid(
                "parallel construction requires deposit_schedule = \"batched\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeded from the OS unless a seed is given.
    #[default]
    NonReproducible,

    /// Deterministic: always seeded.
    Reproducible,

    /// Deterministic, and checks pheromone and tour invariants every iteration.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Colony parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ColonyParams {
    /// Ants constructing a tour per iteration.
    pub ant_count: usize,

    /// Iterations per run.
    pub iteration_count: usize,

    /// Fraction of pheromone removed per iteration.
    pub evaporation_rate: f64,

    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Distance influence exponent.
    pub beta: f64,

    /// Pheromone on every edge at run start.
    pub initial_pheromone: f64,

    /// When ants deposit pheromone within an iteration.
    pub deposit_schedule: DepositSchedule,

    /// How ant tours are constructed within an iteration.
    pub construction: ConstructionMode,
}

impl Default for ColonyParams {
    fn default() -> Self {
        Self {
            ant_count: 20,
            iteration_count: 100,
            evaporation_rate: DEFAULT_EVAPORATION_RATE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            initial_pheromone: DEFAULT_INITIAL_PHEROMONE,
            deposit_schedule: DepositSchedule::default(),
            construction: ConstructionMode::default(),
        }
    }
}

/// When ants deposit pheromone within one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositSchedule {
    /// Each ant deposits right after its tour is scored; later ants in the
    /// same iteration see the reinforcement.
    #[default]
    PerAnt,

    /// All ants build against the iteration-start trails, then deposit in
    /// ant order.
    Batched,
}

/// How tours are constructed within one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMode {
    /// One ant after another on the calling thread.
    #[default]
    Sequential,

    /// Ants build concurrently on the rayon pool. Requires
    /// [`DepositSchedule::Batched`].
    Parallel,
}
