use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::catalog::Catalog;
use crate::model::config::CatalogConfig;
use crate::model::record::Record;

/// Name of the catalog directory under the catalog root
pub const CATALOG_DIR: &str = "mixoteca";

/// Error type for catalog I/O operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("not a mixoteca catalog: no mixoteca/catalog.toml found")]
    NotACatalog,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse catalog.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the catalog by walking up from the given directory, looking for
/// a `mixoteca/catalog.toml`.
pub fn discover_catalog(start: &Path) -> Result<PathBuf, CatalogError> {
    let mut current = start.to_path_buf();
    loop {
        let catalog_dir = current.join(CATALOG_DIR);
        if catalog_dir.is_dir() && catalog_dir.join("catalog.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(CatalogError::NotACatalog);
        }
    }
}

/// Load a catalog from its root directory.
///
/// A broken catalog.toml is an error. The records file is not: if it is
/// missing or unparsable the catalog loads with no records.
pub fn load_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    let catalog_dir = root.join(CATALOG_DIR);
    if !catalog_dir.is_dir() {
        return Err(CatalogError::NotACatalog);
    }

    let config_path = catalog_dir.join("catalog.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| CatalogError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: CatalogConfig = toml::from_str(&config_text)?;

    let records = load_records(&catalog_dir, &config.catalog.records);
    tracing::info!(
        catalog = %config.catalog.name,
        records = records.len(),
        "catalog loaded"
    );

    Ok(Catalog {
        root: root.to_path_buf(),
        catalog_dir,
        config,
        records,
    })
}

/// Read the records file (relative to the catalog directory).
///
/// Never fails: any read or parse problem is logged and yields an empty list.
pub fn load_records(catalog_dir: &Path, file: &str) -> Vec<Record> {
    let path = catalog_dir.join(file);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), "could not read records: {}", e);
            return Vec::new();
        }
    };

    match parse_records(&content) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(path = %path.display(), "could not parse records: {}", e);
            recovery::log_recovery(
                catalog_dir,
                RecoveryEntry {
                    timestamp: chrono::Utc::now(),
                    category: RecoveryCategory::Records,
                    description: "records file unparsable".to_string(),
                    fields: vec![
                        ("Source".to_string(), file.to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: String::new(),
                },
            );
            Vec::new()
        }
    }
}

/// Parse a JSON array of records. Later duplicates of an id are dropped so
/// that selections keyed by id stay unambiguous.
pub fn parse_records(content: &str) -> Result<Vec<Record>, serde_json::Error> {
    let parsed: Vec<Record> = serde_json::from_str(content)?;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(parsed.len());
    for record in parsed {
        if seen.insert(record.id) {
            records.push(record);
        } else {
            tracing::warn!(id = record.id, name = %record.name, "duplicate record id dropped");
        }
    }
    Ok(records)
}
