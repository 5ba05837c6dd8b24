//! Checklist state machine for the record open in the detail view.
//!
//! Front ends translate each user gesture into one [`Command`] and present
//! the [`Render`]s that come back, in order. All checked-state lives in the
//! [`SelectionStore`]; the engine only remembers which record is open and
//! whether it is shown as a checklist.

use serde::Serialize;

use crate::io::selection_store::{KeyValueStore, SelectionStore};
use crate::model::{CheckedSet, Record, RecordId};
use crate::ops::checklist_render::{
    self, ChecklistRow, PlainRow, Progress, render_checklist, render_plain,
};

/// How the open record's items are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistMode {
    #[default]
    Plain,
    Checklist,
}

/// The five gestures a front end can forward into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Open a record, optionally going straight to checklist mode
    Open { id: RecordId, checklist: bool },
    ToggleMode,
    ToggleItem(usize),
    ClearCurrent,
    Close,
}

/// What the front end should show after a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "render", rename_all = "snake_case")]
pub enum Render {
    /// Full plain item list
    Plain { record: RecordId, rows: Vec<PlainRow> },
    /// Full checklist rebuild, counter included
    Checklist {
        record: RecordId,
        rows: Vec<ChecklistRow>,
        progress: Progress,
    },
    /// Single-row update after a toggle: the stored state of row `index`
    /// and the new counter
    Counter {
        record: RecordId,
        index: usize,
        checked: bool,
        progress: Progress,
    },
    /// Detail view closed
    Closed,
}

impl Render {
    /// Counter text, for renders that carry one
    pub fn counter(&self) -> Option<String> {
        match self {
            Render::Checklist { progress, .. } | Render::Counter { progress, .. } => {
                Some(progress.label())
            }
            _ => None,
        }
    }
}

/// Per-detail-view state. Created on open, dropped on close.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub open_record: Option<Record>,
    pub mode: ChecklistMode,
}

pub struct ChecklistEngine<B: KeyValueStore> {
    store: SelectionStore<B>,
    session: SessionState,
}

impl<B: KeyValueStore> ChecklistEngine<B> {
    pub fn new(store: SelectionStore<B>) -> Self {
        ChecklistEngine {
            store,
            session: SessionState::default(),
        }
    }

    pub fn store(&self) -> &SelectionStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore<B> {
        &mut self.store
    }

    pub fn mode(&self) -> ChecklistMode {
        self.session.mode
    }

    pub fn open_record(&self) -> Option<&Record> {
        self.session.open_record.as_ref()
    }

    /// Dispatch a command, resolving `Open` ids against `records`.
    pub fn apply(&mut self, command: Command, records: &[Record]) -> Vec<Render> {
        match command {
            Command::Open { id, checklist } => {
                let record = records.iter().find(|r| r.id == id);
                self.open(record, checklist)
            }
            Command::ToggleMode => self.toggle_mode().into_iter().collect(),
            Command::ToggleItem(index) => self.toggle_item(index).into_iter().collect(),
            Command::ClearCurrent => self.clear_current(),
            Command::Close => vec![self.close()],
        }
    }

    /// Open `record` in plain mode, then switch to checklist mode if asked.
    /// A missing record leaves the engine untouched.
    pub fn open(&mut self, record: Option<&Record>, start_in_checklist: bool) -> Vec<Render> {
        let Some(record) = record else {
            tracing::debug!("open ignored: no such record");
            return Vec::new();
        };
        tracing::debug!(record = record.id, start_in_checklist, "open");

        self.session = SessionState {
            open_record: Some(record.clone()),
            mode: ChecklistMode::Plain,
        };

        let mut renders: Vec<Render> = self.render_current().into_iter().collect();
        if start_in_checklist {
            renders.extend(self.toggle_mode());
        }
        renders
    }

    /// Flip between plain and checklist mode. Entering checklist mode reads
    /// the stored selections; leaving it keeps them stored.
    pub fn toggle_mode(&mut self) -> Option<Render> {
        self.session.open_record.as_ref()?;
        self.session.mode = match self.session.mode {
            ChecklistMode::Plain => ChecklistMode::Checklist,
            ChecklistMode::Checklist => ChecklistMode::Plain,
        };
        tracing::debug!(mode = ?self.session.mode, "mode toggled");
        self.render_current()
    }

    /// Flip one item's checked state and persist the whole map.
    ///
    /// Ignored outside checklist mode or for an index the open record does
    /// not have. The counter is read back from the store after the write, so
    /// it never shows a state that was not saved.
    pub fn toggle_item(&mut self, index: usize) -> Option<Render> {
        if self.session.mode != ChecklistMode::Checklist {
            return None;
        }
        let record = self.session.open_record.as_ref()?;
        if !record.has_item(index) {
            tracing::debug!(record = record.id, index, "toggle ignored: index out of range");
            return None;
        }

        let mut map = self.store.load();
        let now_checked = map.toggle(record.id, index);
        if let Err(e) = self.store.save(&map) {
            tracing::error!(record = record.id, index, "could not save selection: {}", e);
            // Rows may already show the toggle; rebuild them from what is stored
            return self.render_current();
        }
        tracing::debug!(record = record.id, index, now_checked, "item toggled");

        let stored = self.store.load().checked(record.id);
        Some(Render::Counter {
            record: record.id,
            index,
            checked: stored.contains(&index),
            progress: checklist_render::progress(record, &stored),
        })
    }

    /// Forget the open record's selections. In checklist mode the list is
    /// rebuilt by leaving and re-entering checklist mode, the same path a
    /// user toggle takes.
    pub fn clear_current(&mut self) -> Vec<Render> {
        let Some(record) = self.session.open_record.as_ref() else {
            return Vec::new();
        };
        if let Err(e) = self.store.clear(record.id) {
            tracing::error!(record = record.id, "could not clear selections: {}", e);
        }

        let mut renders = Vec::new();
        if self.session.mode == ChecklistMode::Checklist {
            renders.extend(self.toggle_mode());
            renders.extend(self.toggle_mode());
        }
        renders
    }

    /// Drop the session. Stored selections are untouched.
    pub fn close(&mut self) -> Render {
        self.session = SessionState::default();
        Render::Closed
    }

    /// Checked set for the open record as currently stored
    pub fn current_checked(&self) -> CheckedSet {
        match &self.session.open_record {
            Some(record) => self.store.load().checked(record.id),
            None => CheckedSet::new(),
        }
    }

    fn render_current(&self) -> Option<Render> {
        let record = self.session.open_record.as_ref()?;
        Some(match self.session.mode {
            ChecklistMode::Plain => Render::Plain {
                record: record.id,
                rows: render_plain(record),
            },
            ChecklistMode::Checklist => {
                let checked = self.store.load().checked(record.id);
                Render::Checklist {
                    record: record.id,
                    rows: render_checklist(record, &checked),
                    progress: checklist_render::progress(record, &checked),
                }
            }
        })
    }
}
