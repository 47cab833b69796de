//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interferometer identifier such as `H1`, `L1` or `V1`.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DetectorId(String);

impl DetectorId {
    /// Create a new `DetectorId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the detector ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Column path of this detector's end time in the coincidence table.
    #[must_use]
    pub fn time_column(&self) -> String {
        format!("{}/time", self.0)
    }

    /// Column path of this detector's trigger index in the coincidence table.
    #[must_use]
    pub fn trigger_id_column(&self) -> String {
        format!("{}/trigger_id", self.0)
    }
}

impl fmt::Display for DetectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DetectorId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DetectorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
