//! TOML configuration shared by the CLI and the TUI.
//!
//! Every field is optional; a missing file section falls back to defaults.
//!
//! ```toml
//! [data]
//! raw_path = "VALUATION.csv"
//! canonical_path = "VALUATION_cleaned.csv"
//!
//! [chart]
//! fast_span = 20
//! slow_span = 200
//! default_start_year = 2021
//!
//! [lookup]
//! match_policy = "first_in_file"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::{ChartDataBuilder, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN};
use crate::data::{MatchPolicy, ValuationRepository};
use crate::error::ConfigError;

/// File name looked up under the user's config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub chart: ChartConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Raw export consumed by `clean`.
    pub raw_path: PathBuf,
    /// Canonical snapshot written by `clean` and read by lookups and charts.
    pub canonical_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("VALUATION.csv"),
            canonical_path: PathBuf::from("VALUATION_cleaned.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub fast_span: usize,
    pub slow_span: usize,
    pub default_start_year: i32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            fast_span: DEFAULT_FAST_SPAN,
            slow_span: DEFAULT_SLOW_SPAN,
            default_start_year: 2021,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub match_policy: MatchPolicy,
}

impl Config {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path if given, else `default_path` if that file exists, else defaults.
    pub fn resolve(explicit: Option<&Path>, default_path: Option<&Path>) -> Result<Self, ConfigError> {
        match (explicit, default_path) {
            (Some(path), _) => Self::from_file(path),
            (None, Some(path)) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart.fast_span == 0 {
            return Err(ConfigError::Invalid {
                field: "chart.fast_span",
                reason: "must be >= 1".into(),
            });
        }
        if self.chart.slow_span == 0 {
            return Err(ConfigError::Invalid {
                field: "chart.slow_span",
                reason: "must be >= 1".into(),
            });
        }
        Ok(())
    }

    pub fn repository(&self) -> ValuationRepository {
        ValuationRepository::new(&self.data.canonical_path).with_policy(self.lookup.match_policy)
    }

    pub fn chart_builder(&self) -> Result<ChartDataBuilder, ConfigError> {
        ChartDataBuilder::new(self.chart.fast_span, self.chart.slow_span).map_err(|e| {
            ConfigError::Invalid {
                field: "chart",
                reason: e.to_string(),
            }
        })
    }
}
