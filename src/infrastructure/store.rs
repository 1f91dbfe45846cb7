//! JSON file store for scan results

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::shared::errors::StoreError;
use crate::shared::types::Opportunity;

/// Persisted result categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpportunityCategory {
    Executable,
    Potential,
}

impl OpportunityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityCategory::Executable => "executable",
            OpportunityCategory::Potential => "potential",
        }
    }
}

/// One pretty-printed JSON array per category under the data directory.
/// Readers must not assume any particular sort order.
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, category: OpportunityCategory) -> PathBuf {
        self.data_dir.join(format!("{}.json", category.as_str()))
    }

    /// Reset a category at the start of a run
    pub fn clear(&self, category: OpportunityCategory) -> Result<(), StoreError> {
        let path = self.path_for(category);
        fs::write(&path, "[]")?;
        debug!("cleared {}", path.display());
        Ok(())
    }

    /// Append one record to a category file
    pub fn append(
        &self,
        record: &Opportunity,
        category: OpportunityCategory,
    ) -> Result<(), StoreError> {
        let path = self.path_for(category);
        let mut records: Vec<Opportunity> = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(_) => Vec::new(),
        };
        records.push(record.clone());
        fs::write(&path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    /// Number of records currently persisted for a category
    pub fn count(&self, category: OpportunityCategory) -> Result<usize, StoreError> {
        let path = self.path_for(category);
        let records: Vec<Opportunity> = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(_) => Vec::new(),
        };
        Ok(records.len())
    }
}
