//! In-memory columnar dataset.
//!
//! Coincidence statistics, single-detector triggers and the template bank
//! are all columnar: a column name maps to a numeric sequence, and every
//! column of one table is indexed by the same row index. Nested groups
//! are addressed with slash paths (`H1/time`, `background_exc/ifar`).

use std::collections::BTreeMap;

use crate::error::{ReportError, ReportResult};

/// A named, read-only set of numeric columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    name: String,
    columns: BTreeMap<String, Vec<f64>>,
}

impl ColumnTable {
    /// Create an empty table. The name is used in error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style column insertion.
    #[must_use]
    pub fn with_column(mut self, field: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(field, values);
        self
    }

    /// Insert or replace a column.
    pub fn insert(&mut self, field: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(field.into(), values);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability query: does this table expose `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.columns.contains_key(field)
    }

    /// All column names, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column, failing with a missing-field error.
    pub fn column(&self, field: &str) -> ReportResult<&[f64]> {
        self.columns
            .get(field)
            .map(Vec::as_slice)
            .ok_or_else(|| ReportError::missing_field(&self.name, field))
    }

    /// Read one cell of a column at `index`.
    pub fn value(&self, field: &str, index: usize) -> ReportResult<f64> {
        let column = self.column(field)?;
        column
            .get(index)
            .copied()
            .ok_or(ReportError::OutOfRange {
                what: "row",
                index,
                len: column.len(),
            })
    }

    /// Read one cell if the column exists.
    ///
    /// An absent column yields `Ok(None)`; an out-of-range index on a
    /// present column is still an error.
    pub fn optional_value(&self, field: &str, index: usize) -> ReportResult<Option<f64>> {
        if self.contains(field) {
            self.value(field, index).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Row count of the given column.
    pub fn len_of(&self, field: &str) -> ReportResult<usize> {
        self.column(field).map(<[f64]>::len)
    }

    /// Extract the sub-group rooted at `prefix`, stripping the prefix.
    ///
    /// `group("background_exc")` turns `background_exc/ifar` into `ifar`
    /// and `background_exc/H1/time` into `H1/time`.
    #[must_use]
    pub fn group(&self, prefix: &str) -> ColumnTable {
        let lead = format!("{}/", prefix.trim_end_matches('/'));
        let columns = self
            .columns
            .iter()
            .filter_map(|(field, values)| {
                field
                    .strip_prefix(&lead)
                    .map(|rest| (rest.to_string(), values.clone()))
            })
            .collect();
        ColumnTable {
            name: format!("{}:{}", self.name, prefix),
            columns,
        }
    }
}

/// Interpret a stored numeric cell as a non-negative row index.
///
/// Identifiers are stored as floating point in columnar files; anything
/// negative, fractional or non-finite does not name a row.
#[must_use]
pub fn as_index(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}
