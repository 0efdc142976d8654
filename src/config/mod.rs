//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Defaults for new tournaments and summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Teams registered when no names are given
    #[serde(default = "default_team_count")]
    pub team_count: usize,

    /// Teams shown per match in the summary
    #[serde(default = "default_podium_size")]
    pub podium_size: usize,
}

fn default_team_count() -> usize {
    12
}

fn default_podium_size() -> usize {
    3
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            team_count: default_team_count(),
            podium_size: default_podium_size(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tournament: TournamentConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            tournament: TournamentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournament.team_count == 0 {
            return Err(ConfigError::ValidationError(
                "Team count must be greater than 0".to_string(),
            ));
        }

        if self.tournament.podium_size == 0 {
            return Err(ConfigError::ValidationError(
                "Podium size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
