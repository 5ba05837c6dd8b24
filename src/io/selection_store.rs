use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::{RecordId, SelectionMap};

/// Namespace key for the selection map. The version tag keeps a future
/// incompatible layout from reading (or clobbering) this one.
pub const STORAGE_KEY: &str = "mixoteca_selections_v1";

/// Error type for selection store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write selections to {key}: {source}")]
    WriteError { key: String, source: io::Error },
    #[error("could not serialize selections: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Durable byte storage keyed by string.
pub trait KeyValueStore {
    /// Read the value for `key`, `Ok(None)` when it was never written.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    /// Replace the value for `key` in full.
    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        (**self).set(key, value)
    }
}

/// One JSON file per key inside a directory. The directory is created on
/// first write, and writes go through a temp file + rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        recovery::atomic_write(&self.path_for(key), value)
    }
}

/// In-process store, for tests and sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Persistent record-id → checked-indices mapping.
///
/// `load` never fails: a missing, unreadable or corrupt backing value reads
/// as an empty map. Corrupt bytes are copied to the recovery log (once per
/// store) before they can be overwritten by the next save.
pub struct SelectionStore<B: KeyValueStore> {
    backend: B,
    recovery_dir: Option<PathBuf>,
    corruption_reported: Cell<bool>,
}

impl<B: KeyValueStore> SelectionStore<B> {
    pub fn new(backend: B) -> Self {
        SelectionStore {
            backend,
            recovery_dir: None,
            corruption_reported: Cell::new(false),
        }
    }

    /// Preserve corrupt store contents in `<catalog_dir>/.recovery.log`
    pub fn with_recovery_log(mut self, catalog_dir: impl Into<PathBuf>) -> Self {
        self.recovery_dir = Some(catalog_dir.into());
        self
    }

    /// The full stored mapping, or an empty one if nothing usable is stored.
    pub fn load(&self) -> SelectionMap {
        let bytes = match self.backend.get(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return SelectionMap::new(),
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, "selection store unreadable: {}", e);
                return SelectionMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                self.report_corruption(&bytes, &e);
                SelectionMap::new()
            }
        }
    }

    /// Overwrite the whole stored mapping.
    pub fn save(&mut self, map: &SelectionMap) -> Result<(), StoreError> {
        let content = serde_json::to_vec(map)?;
        self.backend
            .set(STORAGE_KEY, &content)
            .map_err(|source| StoreError::WriteError {
                key: STORAGE_KEY.to_string(),
                source,
            })
    }

    /// Forget the selections for one record.
    pub fn clear(&mut self, id: RecordId) -> Result<(), StoreError> {
        let mut map = self.load();
        map.remove(id);
        self.save(&map)
    }

    fn report_corruption(&self, bytes: &[u8], err: &serde_json::Error) {
        if self.corruption_reported.replace(true) {
            return;
        }
        tracing::warn!(
            key = STORAGE_KEY,
            "selection store is corrupt, starting with no selections: {}",
            err
        );
        if let Some(dir) = &self.recovery_dir {
            recovery::log_recovery(
                dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Store,
                    description: "unparsable selections".to_string(),
                    fields: vec![
                        ("Key".to_string(), STORAGE_KEY.to_string()),
                        ("Error".to_string(), err.to_string()),
                    ],
                    body: String::from_utf8_lossy(bytes).into_owned(),
                },
            );
        }
    }
}

impl SelectionStore<FileStore> {
    /// File-backed store for a catalog directory (`<catalog_dir>/.store/`),
    /// with recovery logging into the same directory.
    pub fn open(catalog_dir: &Path) -> Self {
        SelectionStore::new(FileStore::new(catalog_dir.join(".store")))
            .with_recovery_log(catalog_dir)
    }
}
