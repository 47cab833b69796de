//! Event selection request and result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Ordering applied to the sort key before picking the k-th event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    /// Loudest first for significance columns such as `ifar`.
    #[default]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ReportError;

    fn from_str(s: &str) -> ReportResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(ReportError::configuration(format!(
                "unknown sort order '{other}', expected ascending or descending"
            ))),
        }
    }
}

/// Which coincident event to report on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EventQuery {
    /// The `rank`-th event (zero-based) after sorting by `sort_key`.
    Rank {
        rank: usize,
        sort_key: String,
        order: SortOrder,
    },
    /// An explicit row index, used verbatim.
    Id { index: usize },
}

impl EventQuery {
    /// Build a query from the two mutually exclusive selection options.
    ///
    /// Exactly one of `rank` and `index` must be given.
    pub fn from_options(
        rank: Option<usize>,
        index: Option<usize>,
        sort_key: impl Into<String>,
        order: SortOrder,
    ) -> ReportResult<Self> {
        match (rank, index) {
            (Some(rank), None) => Ok(Self::Rank {
                rank,
                sort_key: sort_key.into(),
                order,
            }),
            (None, Some(index)) => Ok(Self::Id { index }),
            (Some(_), Some(_)) => Err(ReportError::configuration(
                "choose either a rank or an event id, not both",
            )),
            (None, None) => Err(ReportError::configuration(
                "one of a rank or an event id must be given",
            )),
        }
    }

    /// Default title, also used as the default caption.
    #[must_use]
    pub fn default_title(&self) -> String {
        match self {
            Self::Rank { rank, .. } => format!("Parameters of event ranked {}", rank + 1),
            Self::Id { .. } => "Details of trigger".to_string(),
        }
    }
}

/// The resolved event row plus its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedEvent {
    pub index: usize,
    pub title: String,
    pub caption: String,
    pub query: EventQuery,
}
