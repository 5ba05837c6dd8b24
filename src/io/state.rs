use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::RecordId;

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Search filter in effect when the TUI last exited
    #[serde(default)]
    pub last_search: Option<String>,
    /// Record under the grid cursor
    #[serde(default)]
    pub cursor_record: Option<RecordId>,
}

/// Read .state.json from the catalog directory
pub fn read_ui_state(catalog_dir: &Path) -> Option<UiState> {
    let path = catalog_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the catalog directory
pub fn write_ui_state(catalog_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = catalog_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
