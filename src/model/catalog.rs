use std::path::PathBuf;

use super::config::CatalogConfig;
use super::record::{Record, RecordId};

/// A fully loaded catalog
#[derive(Debug)]
pub struct Catalog {
    /// Root directory of the catalog (parent of `mixoteca/`)
    pub root: PathBuf,
    /// Path to the `mixoteca/` directory
    pub catalog_dir: PathBuf,
    /// Parsed catalog.toml
    pub config: CatalogConfig,
    /// Records in file order
    pub records: Vec<Record>,
}

impl Catalog {
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Directory holding the selection store files
    pub fn store_dir(&self) -> PathBuf {
        self.catalog_dir.join(".store")
    }
}
