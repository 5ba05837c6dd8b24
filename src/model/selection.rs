use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::record::RecordId;

/// Checked item indices for one record
pub type CheckedSet = BTreeSet<usize>;

/// Durable mapping from record id to the indices of its checked items.
///
/// Serialized as `{"<id>": [0, 2]}`. Sets are kept sorted and empty sets
/// are never stored, so two maps holding the same selections compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMap {
    entries: BTreeMap<RecordId, CheckedSet>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checked set for a record, empty when nothing is stored
    pub fn checked(&self, id: RecordId) -> CheckedSet {
        self.entries.get(&id).cloned().unwrap_or_default()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Replace the checked set for a record. An empty set removes the entry.
    pub fn set(&mut self, id: RecordId, checked: CheckedSet) {
        if checked.is_empty() {
            self.entries.remove(&id);
        } else {
            self.entries.insert(id, checked);
        }
    }

    /// Flip membership of `index` for `id`. Returns whether it is now checked.
    pub fn toggle(&mut self, id: RecordId, index: usize) -> bool {
        let mut checked = self.checked(id);
        let now_checked = if checked.remove(&index) {
            false
        } else {
            checked.insert(index);
            true
        };
        self.set(id, checked);
        now_checked
    }

    /// Drop the entry for one record
    pub fn remove(&mut self, id: RecordId) -> Option<CheckedSet> {
        self.entries.remove(&id)
    }
}

impl FromIterator<(RecordId, CheckedSet)> for SelectionMap {
    fn from_iter<I: IntoIterator<Item = (RecordId, CheckedSet)>>(iter: I) -> Self {
        let mut map = SelectionMap::new();
        for (id, checked) in iter {
            map.set(id, checked);
        }
        map
    }
}
