//! Storage port for columnar input datasets.
//!
//! The coincidence statistics, single-detector triggers and the template
//! bank all arrive through this contract. Adapters own the file format;
//! the core only ever sees read-only [`ColumnTable`]s.

use std::path::Path;

use crate::domain::ColumnTable;
use crate::error::Result;

/// Loads a columnar dataset from a location.
pub trait DatasetSource {
    /// Read the dataset at `path`.
    ///
    /// Nested groups must be exposed as slash-separated column paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or is malformed.
    fn load(&self, path: &Path) -> Result<ColumnTable>;
}
