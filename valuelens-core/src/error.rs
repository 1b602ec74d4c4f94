//! Error taxonomy for the valuation pipeline.
//!
//! Every failure crosses component boundaries as a typed value so UI-layer
//! callers can render a message instead of crashing. Nothing here is
//! retried: all operations are local and deterministic.

use std::path::PathBuf;

use thiserror::Error;

/// The shape of a table is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("input has no columns")]
    EmptySchema,

    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// Failures reading, parsing or writing valuation files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("row {row}: unparseable date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: column {column} has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Failures of a point lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("no data for ticker {0}")]
    TickerNotFound(String),

    #[error("invalid metrics: {0:?}; accepted: PE, PB, PS")]
    InvalidMetric(Vec<String>),

    #[error("lookup failed: {0}")]
    Other(String),
}

impl From<DataError> for LookupError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(path) => LookupError::DatasetNotFound(path),
            other => LookupError::Other(other.to_string()),
        }
    }
}

/// Precondition violations of the EMA smoother.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SmoothingError {
    #[error("EMA span must be >= 1, got {0}")]
    InvalidSpan(usize),
}

/// Failures building a chart view. "No data" is not an error; it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("invalid metric: {0}; accepted: PE, PB, PS")]
    InvalidMetric(String),

    #[error(transparent)]
    Smoothing(#[from] SmoothingError),

    #[error("chart failed: {0}")]
    Other(String),
}

impl From<DataError> for ChartError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(path) => ChartError::DatasetNotFound(path),
            other => ChartError::Other(other.to_string()),
        }
    }
}

/// Failures loading or validating the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
