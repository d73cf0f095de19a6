//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
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

/// Per-season pool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Season identifier, usually the year it starts in
    pub year: u32,

    /// Number of regular weeks
    #[serde(default = "default_weeks")]
    pub weeks: u32,

    /// Weeks counted toward the best-finish standings (e.g. 11-14)
    #[serde(default)]
    pub best_finish_weeks: Vec<u32>,
}

fn default_weeks() -> u32 {
    18
}

impl SeasonConfig {
    pub fn new(year: u32, weeks: u32) -> Self {
        Self {
            year,
            weeks,
            best_finish_weeks: Vec::new(),
        }
    }

    pub fn with_best_finish_weeks(mut self, weeks: Vec<u32>) -> Self {
        self.best_finish_weeks = weeks;
        self
    }

    pub fn contains_week(&self, week: u32) -> bool {
        (1..=self.weeks).contains(&week)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
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
    pub server: ServerConfig,

    #[serde(default)]
    pub seasons: Vec<SeasonConfig>,
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
            server: ServerConfig::default(),
            seasons: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a season's settings.
    pub fn season(&self, year: u32) -> Option<&SeasonConfig> {
        self.seasons.iter().find(|s| s.year == year)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let mut years = HashSet::new();
        for season in &self.seasons {
            if !years.insert(season.year) {
                return Err(ConfigError::ValidationError(format!(
                    "Season {} is configured more than once",
                    season.year
                )));
            }

            if season.weeks == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "Season {} must have at least one week",
                    season.year
                )));
            }

            if let Some(week) = season
                .best_finish_weeks
                .iter()
                .find(|w| !season.contains_week(**w))
            {
                return Err(ConfigError::ValidationError(format!(
                    "Season {} best-finish week {} is outside weeks 1-{}",
                    season.year, week, season.weeks
                )));
            }
        }

        Ok(())
    }
}
