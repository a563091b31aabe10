//! Tracker configuration.
//!
//! Configuration can be built in code or loaded from a TOML file:
//!
//! ```toml
//! roster = ["Kragg", "Etalus", "Forsburn"]
//! seed = 42
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::roster;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but its values are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a [`RunTracker`](crate::RunTracker).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Roster used when a run is started without naming characters.
    pub roster: Vec<String>,
    /// Seed used when a run or shuffle is requested without one.
    /// `None` derives a seed from the clock.
    pub seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            roster: roster::default_roster(),
            seed: None,
        }
    }
}

impl TrackerConfig {
    /// Set the default roster.
    pub fn with_roster<I, S>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = roster.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the fallback seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load and validate a TOML configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Parse and validate TOML configuration. Missing keys keep their defaults.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the roster could start a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        roster::validate(&self.roster).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
