//! Pure mapping from a record (and its checked set) to display rows.
//!
//! Nothing here holds state: the same inputs always produce the same rows,
//! so the engine rebuilds the whole list on every change instead of
//! patching it.

use serde::Serialize;

use crate::model::{CheckedSet, Record};
use crate::ops::checklist::Command;

/// A row in plain (read-only) mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainRow {
    pub label: String,
}

/// A row in checklist mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistRow {
    pub label: String,
    pub index: usize,
    pub checked: bool,
}

impl ChecklistRow {
    /// The engine command a toggle gesture on this row maps to
    pub fn command(&self) -> Command {
        Command::ToggleItem(self.index)
    }
}

/// Checked items out of the record's total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.checked == self.total
    }

    pub fn label(&self) -> String {
        render_counter(self.checked, self.total)
    }
}

pub fn render_plain(record: &Record) -> Vec<PlainRow> {
    record
        .items
        .iter()
        .map(|item| PlainRow {
            label: item.clone(),
        })
        .collect()
}

/// One row per item in original order. Stored indices past the end of the
/// item list are never enumerated, so they cannot show up here.
pub fn render_checklist(record: &Record, checked: &CheckedSet) -> Vec<ChecklistRow> {
    record
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| ChecklistRow {
            label: item.clone(),
            index,
            checked: checked.contains(&index),
        })
        .collect()
}

pub fn render_counter(checked_count: usize, total: usize) -> String {
    format!("{} of {} selected", checked_count, total)
}

/// Count of checked indices that address an item of `record`
pub fn progress(record: &Record, checked: &CheckedSet) -> Progress {
    Progress {
        checked: checked.iter().filter(|&&i| record.has_item(i)).count(),
        total: record.items.len(),
    }
}

/// Command for the row under `cursor`, if there is one
pub fn command_for_row(rows: &[ChecklistRow], cursor: usize) -> Option<Command> {
    rows.get(cursor).map(ChecklistRow::command)
}
