use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures that abort a report run.
///
/// Every variant is unrecoverable for the current report: there is no
/// partial output. Each carries enough context (detector, field, index)
/// to diagnose the inconsistent input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// Selection or statistic configuration is invalid.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// An index fell outside the dataset it addresses.
    #[error("{what} {index} out of range (dataset has {len} entries)")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A required column is absent from an input dataset.
    #[error("missing field '{field}' in {dataset}")]
    MissingField { dataset: String, field: String },

    /// An index resolved from one dataset has no entry in another.
    #[error("join failed for {detector}: {reason}")]
    Join { detector: String, reason: String },
}

impl ReportError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(dataset: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            dataset: dataset.into(),
            field: field.into(),
        }
    }

    pub(crate) fn join(detector: impl ToString, reason: impl Into<String>) -> Self {
        Self::Join {
            detector: detector.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset {path}: {reason}")]
    Dataset { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result type for the selection, join and formatting core.
pub type ReportResult<T> = std::result::Result<T, ReportError>;
