//! Report selection defaults.

use serde::Deserialize;

use crate::domain::SortOrder;

/// Defaults for which coincidence group and sort the CLI uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Group of the coincidence file to read, e.g. `foreground`.
    pub coinc_group: String,
    /// Column ranked events are sorted by.
    pub sort_key: String,
    pub sort_order: SortOrder,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            coinc_group: "background_exc".into(),
            sort_key: "ifar".into(),
            sort_order: SortOrder::Descending,
        }
    }
}
