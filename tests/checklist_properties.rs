//! Checklist engine behavior through the public API, against both the
//! in-memory and the file-backed store.

use mixoteca::io::selection_store::{
    FileStore, KeyValueStore, MemoryStore, STORAGE_KEY, SelectionStore,
};
use mixoteca::model::{CheckedSet, Record, SelectionMap};
use mixoteca::ops::checklist::{ChecklistEngine, ChecklistMode, Command, Render};
use mixoteca::ops::search::filter_records;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn records() -> Vec<Record> {
    vec![
        Record::new(1, "Gin Tonic", &["gin", "tonic", "lime"]),
        Record::new(2, "Four", &["a", "b", "c", "d"]),
        Record::new(3, "Mojito", &["rum", "mint", "lime", "soda"]),
    ]
}

fn memory_engine() -> ChecklistEngine<MemoryStore> {
    ChecklistEngine::new(SelectionStore::new(MemoryStore::new()))
}

fn checked_rows(render: &Render) -> Vec<bool> {
    match render {
        Render::Checklist { rows, .. } => rows.iter().map(|r| r.checked).collect(),
        other => panic!("expected a checklist render, got {:?}", other),
    }
}

#[test]
fn toggling_twice_restores_prior_set() {
    let records = records();
    let mut engine = memory_engine();
    engine.apply(Command::Open { id: 2, checklist: true }, &records);
    engine.apply(Command::ToggleItem(0), &records);
    let before = engine.store().load();

    engine.apply(Command::ToggleItem(3), &records);
    engine.apply(Command::ToggleItem(3), &records);
    assert_eq!(engine.store().load(), before);
}

#[test]
fn counter_matches_checked_count() {
    let records = records();
    let mut engine = memory_engine();
    engine.apply(Command::Open { id: 2, checklist: true }, &records);
    engine.apply(Command::ToggleItem(1), &records);
    let renders = engine.apply(Command::ToggleItem(3), &records);
    assert_eq!(renders.len(), 1);
    assert_eq!(renders[0].counter().as_deref(), Some("2 of 4 selected"));
}

#[test]
fn file_store_round_trip() {
    let tmp = TempDir::new().unwrap();
    let map: SelectionMap = [(1, CheckedSet::from([0, 2])), (3, CheckedSet::from([1]))]
        .into_iter()
        .collect();

    SelectionStore::open(tmp.path()).save(&map).unwrap();
    assert_eq!(SelectionStore::open(tmp.path()).load(), map);
}

#[test]
fn engine_state_survives_a_new_engine() {
    let tmp = TempDir::new().unwrap();
    let records = records();
    {
        let mut engine = ChecklistEngine::new(SelectionStore::open(tmp.path()));
        engine.apply(Command::Open { id: 3, checklist: true }, &records);
        engine.apply(Command::ToggleItem(1), &records);
        engine.apply(Command::Close, &records);
    }

    let mut engine = ChecklistEngine::new(SelectionStore::open(tmp.path()));
    let renders = engine.apply(Command::Open { id: 3, checklist: true }, &records);
    let last = renders.last().unwrap();
    assert_eq!(checked_rows(last), vec![false, true, false, false]);
    assert_eq!(last.counter().as_deref(), Some("1 of 4 selected"));
}

#[test]
fn mode_switch_keeps_selections() {
    let records = records();
    let mut engine = memory_engine();
    engine.apply(Command::Open { id: 2, checklist: true }, &records);
    engine.apply(Command::ToggleItem(0), &records);
    engine.apply(Command::ToggleItem(2), &records);

    let plain = engine.apply(Command::ToggleMode, &records);
    assert!(matches!(plain[0], Render::Plain { .. }));
    assert_eq!(engine.mode(), ChecklistMode::Plain);

    let back = engine.apply(Command::ToggleMode, &records);
    assert_eq!(checked_rows(&back[0]), vec![true, false, true, false]);
    assert_eq!(back[0].counter().as_deref(), Some("2 of 4 selected"));
}

#[test]
fn clear_resets_open_record() {
    let records = records();
    let mut engine = memory_engine();
    engine.apply(Command::Open { id: 1, checklist: true }, &records);
    engine.apply(Command::ToggleItem(0), &records);
    engine.apply(Command::ToggleItem(2), &records);

    let renders = engine.apply(Command::ClearCurrent, &records);
    let last = renders.last().unwrap();
    assert_eq!(checked_rows(last), vec![false, false, false]);
    assert_eq!(last.counter().as_deref(), Some("0 of 3 selected"));
    assert!(!engine.store().load().contains(1));
}

#[test]
fn corrupt_backing_data_loads_empty() {
    let mut backend = MemoryStore::new();
    backend.set(STORAGE_KEY, b"\x00\x01 not json").unwrap();
    let records = records();
    let mut engine = ChecklistEngine::new(SelectionStore::new(backend));

    let renders = engine.apply(Command::Open { id: 1, checklist: true }, &records);
    assert_eq!(
        renders.last().unwrap().counter().as_deref(),
        Some("0 of 3 selected")
    );

    // A toggle writes a fresh, valid map over the corrupt value
    engine.apply(Command::ToggleItem(1), &records);
    assert_eq!(engine.store().load().checked(1), CheckedSet::from([1]));
}

#[test]
fn search_never_touches_selections() {
    let tmp = TempDir::new().unwrap();
    let records = records();
    let mut engine = ChecklistEngine::new(SelectionStore::open(tmp.path()));
    engine.apply(Command::Open { id: 1, checklist: true }, &records);
    engine.apply(Command::ToggleItem(2), &records);
    let store_path = FileStore::new(tmp.path().join(".store")).path_for(STORAGE_KEY);
    let before = std::fs::read(&store_path).unwrap();

    let hits: Vec<u64> = filter_records(&records, " LIME ").iter().map(|r| r.id).collect();
    assert_eq!(hits, vec![1, 3]);
    assert!(filter_records(&records, "tequila").is_empty());

    assert_eq!(std::fs::read(&store_path).unwrap(), before);
}

#[test]
fn stale_indices_are_ignored_but_kept() {
    let records = records();
    let mut backend = MemoryStore::new();
    backend.set(STORAGE_KEY, br#"{"1":[0,9]}"#).unwrap();
    let mut engine = ChecklistEngine::new(SelectionStore::new(backend));

    let renders = engine.apply(Command::Open { id: 1, checklist: true }, &records);
    let last = renders.last().unwrap();
    assert_eq!(checked_rows(last), vec![true, false, false]);
    assert_eq!(last.counter().as_deref(), Some("1 of 3 selected"));

    engine.apply(Command::ToggleItem(1), &records);
    assert_eq!(engine.store().load().checked(1), CheckedSet::from([0, 1, 9]));
}

#[test]
fn commands_without_open_record_are_no_ops() {
    let records = records();
    let mut engine = memory_engine();
    assert!(engine.apply(Command::ToggleMode, &records).is_empty());
    assert!(engine.apply(Command::ToggleItem(0), &records).is_empty());
    assert!(engine.apply(Command::ClearCurrent, &records).is_empty());
    assert!(engine.apply(Command::Open { id: 99, checklist: true }, &records).is_empty());
    assert!(engine.store().load().is_empty());
}
