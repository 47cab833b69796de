use std::collections::HashMap;
use std::path::{Path, PathBuf};

use coincinfo::adapter::outbound::json::JsonDatasetSource;
use coincinfo::domain::ColumnTable;
use coincinfo::error::{Error, Result};
use coincinfo::port::DatasetSource;
use serde_json::Value;

/// Dataset source backed by in-memory JSON documents.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn add(&mut self, path: &str, document: Value) {
        self.documents.insert(path.into(), document.to_string());
    }
}

impl DatasetSource for MemorySource {
    fn load(&self, path: &Path) -> Result<ColumnTable> {
        let content = self.documents.get(path).ok_or_else(|| Error::Dataset {
            path: path.display().to_string(),
            reason: "not registered".to_string(),
        })?;
        JsonDatasetSource::parse(&path.display().to_string(), content)
    }
}
