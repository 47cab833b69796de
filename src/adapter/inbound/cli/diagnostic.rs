//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration parse errors are shown against the file content with the
//! offending span labelled; every other failure gets a help line naming
//! what to check.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, ReportError};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(coincinfo::config))]
pub struct ConfigSourceError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,
}

/// Any other failure, with a suggestion.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(coincinfo::report))]
pub struct ReportFailure {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Convert a crate error into a renderable diagnostic.
#[must_use]
pub fn diagnose(err: &Error, config_path: &Path) -> miette::Report {
    if let Error::Config(ConfigError::Parse(parse)) = err {
        if let (Some(span), Ok(src)) = (parse.span(), std::fs::read_to_string(config_path)) {
            return miette::Report::new(ConfigSourceError {
                message: format!("failed to parse {}", config_path.display()),
                src,
                span: (span.start, span.end.saturating_sub(span.start)).into(),
            });
        }
    }

    miette::Report::new(ReportFailure {
        message: err.to_string(),
        help: help_for(err).map(str::to_string),
    })
}

fn help_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Report(ReportError::Configuration { .. }) => {
            Some("pass exactly one of --n-loudest or --trigger-id, and a known ranking statistic")
        }
        Error::Report(ReportError::OutOfRange { .. }) => {
            Some("the coincidence group has fewer events than requested")
        }
        Error::Report(ReportError::MissingField { .. }) => {
            Some("check that the input files come from the same search and the group name is right")
        }
        Error::Report(ReportError::Join { .. }) => {
            Some("trigger and template ids do not match the given files; were they generated together?")
        }
        Error::Config(_) => Some("see the [logging], [statistic], [links] and [report] sections"),
        Error::Json(_) | Error::Dataset { .. } => {
            Some("inputs must be JSON objects of numeric arrays")
        }
        Error::Io(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_errors_get_help() {
        let err = Error::Report(ReportError::Join {
            detector: "H1".into(),
            reason: "template id 9 not in bank".into(),
        });
        assert!(help_for(&err).is_some());
        let report = diagnose(&err, Path::new("missing.toml"));
        assert!(report.to_string().contains("H1"));
    }
}
