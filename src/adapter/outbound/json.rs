//! JSON-backed columnar datasets.
//!
//! A dataset is a JSON object. Arrays of numbers become columns; nested
//! objects become groups addressed by slash paths, so
//! `{"H1": {"snr": [8.1]}}` yields the column `H1/snr`. Scalars and
//! non-numeric arrays are attributes and are skipped.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::ColumnTable;
use crate::error::{Error, Result};
use crate::port::DatasetSource;

/// Reads datasets from JSON files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDatasetSource;

impl JsonDatasetSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a dataset from JSON text. `name` labels errors.
    pub fn parse(name: &str, content: &str) -> Result<ColumnTable> {
        let root: Value = serde_json::from_str(content)?;
        let Value::Object(_) = &root else {
            return Err(Error::Dataset {
                path: name.to_string(),
                reason: "top level must be an object".to_string(),
            });
        };

        let mut table = ColumnTable::new(name);
        flatten(name, "", &root, &mut table)?;
        Ok(table)
    }
}

impl DatasetSource for JsonDatasetSource {
    fn load(&self, path: &Path) -> Result<ColumnTable> {
        let content = fs::read_to_string(path)?;
        let name = path.display().to_string();
        let table = Self::parse(&name, &content)?;
        info!(path = %name, columns = table.fields().count(), "Loaded dataset");
        Ok(table)
    }
}

fn flatten(name: &str, prefix: &str, value: &Value, table: &mut ColumnTable) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}/{key}")
                };
                flatten(name, &path, child, table)?;
            }
        }
        Value::Array(items) => match numeric_column(items) {
            Some(values) => table.insert(prefix, values),
            None if items.iter().any(Value::is_number) => {
                return Err(Error::Dataset {
                    path: name.to_string(),
                    reason: format!("column '{prefix}' mixes numbers with other values"),
                });
            }
            None => debug!(dataset = name, field = prefix, "Skipping non-numeric array"),
        },
        _ => debug!(dataset = name, field = prefix, "Skipping attribute"),
    }
    Ok(())
}

/// Numeric array to column. `null` entries read as NaN.
fn numeric_column(items: &[Value]) -> Option<Vec<f64>> {
    if items.is_empty() {
        return Some(Vec::new());
    }
    if !items.iter().any(Value::is_number) {
        return None;
    }
    items
        .iter()
        .map(|item| match item {
            Value::Number(number) => number.as_f64(),
            Value::Null => Some(f64::NAN),
            _ => None,
        })
        .collect()
}
