//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; an absent section takes its defaults.
//!
//! # Example
//!
//! ```no_run
//! use coincinfo::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("coincinfo.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::links::LinksConfig;
use super::logging::LoggingConfig;
use super::report::ReportConfig;
use crate::application::statistic::{StatisticConfig, StatisticFamily};
use crate::domain::ranking::SnglRanking;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// Ranking statistic used for the per-detector column.
    pub statistic: StatisticConfig,

    /// URL templates for the optional link columns.
    pub links: LinksConfig,

    /// Coincidence group and sort defaults.
    pub report: ReportConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize the tracing subscriber with this configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.report.coinc_group.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "coinc_group",
            }
            .into());
        }
        if self.report.sort_key.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "sort_key" }.into());
        }
        StatisticFamily::parse(&self.statistic.ranking_statistic).map_err(|e| {
            ConfigError::InvalidValue {
                field: "ranking_statistic",
                reason: e.to_string(),
            }
        })?;
        self.statistic
            .sngl_ranking
            .parse::<SnglRanking>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "sngl_ranking",
                reason: e.to_string(),
            })?;
        self.links.validate()
    }
}
