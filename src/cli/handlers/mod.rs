mod init;
pub use init::cmd_init;

use std::error::Error;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::catalog_io::{self, CATALOG_DIR};
use crate::io::recovery;
use crate::io::selection_store::{FileStore, KeyValueStore, SelectionStore};
use crate::model::{Catalog, Record, RecordId};
use crate::ops::checklist::{ChecklistEngine, Command, Render};
use crate::ops::{checklist_render, search};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    crate::logging::init_stderr_logging();

    let json = cli.json;
    let dir = cli.catalog_dir.as_deref();

    match cli.command {
        None => Err("no subcommand given (run `mixo` alone for the TUI)".into()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before catalog discovery
            Commands::Init(args) => cmd_init(args),

            Commands::List(args) => cmd_list(dir, args, json),
            Commands::Show(args) => cmd_show(dir, args, json),
            Commands::Check(args) => cmd_check(dir, args, json),
            Commands::Clear(args) => cmd_clear(dir, args, json),
            Commands::Recovery(args) => cmd_recovery(dir, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn catalog_root(dir: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    let start = match dir {
        Some(d) => std::fs::canonicalize(d)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?,
        None => std::env::current_dir()?,
    };
    Ok(catalog_io::discover_catalog(&start)?)
}

fn load_catalog_from(dir: Option<&str>) -> Result<Catalog, Box<dyn Error>> {
    let root = catalog_root(dir)?;
    Ok(catalog_io::load_catalog(&root)?)
}

fn open_engine(catalog: &Catalog) -> ChecklistEngine<FileStore> {
    ChecklistEngine::new(SelectionStore::open(&catalog.catalog_dir))
}

fn find_record(catalog: &Catalog, id: RecordId) -> Result<&Record, Box<dyn Error>> {
    catalog
        .find(id)
        .ok_or_else(|| format!("record not found: {}", id).into())
}

/// Open `record` in checklist mode and toggle each index in order. Every
/// index is checked against the record before anything is written.
fn check_indices<B: KeyValueStore>(
    engine: &mut ChecklistEngine<B>,
    record: &Record,
    indices: &[usize],
) -> Result<Render, String> {
    if let Some(bad) = indices.iter().find(|&&i| !record.has_item(i)) {
        return Err(format!(
            "index {} out of range: {} has {} ingredients",
            bad,
            record.name,
            record.items.len()
        ));
    }

    engine.open(Some(record), true);
    for &index in indices {
        engine.apply(Command::ToggleItem(index), std::slice::from_ref(record));
    }
    // Reopen for a full rebuild from what was stored
    last_full_render(engine.open(Some(record), true))
}

/// Open `record` in checklist mode and clear its selections
fn clear_record<B: KeyValueStore>(
    engine: &mut ChecklistEngine<B>,
    record: &Record,
) -> Result<Render, String> {
    engine.open(Some(record), true);
    last_full_render(engine.clear_current())
}

fn last_full_render(renders: Vec<Render>) -> Result<Render, String> {
    renders
        .into_iter()
        .rev()
        .find(|r| matches!(r, Render::Plain { .. } | Render::Checklist { .. }))
        .ok_or_else(|| "nothing to show".to_string())
}

fn print_detail(record: &Record, render: &Render, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&detail_to_json(record, render))?);
        return Ok(());
    }

    for line in format_record_header(record) {
        println!("{}", line);
    }
    println!();
    for line in format_render(render) {
        println!("{}", line);
    }
    if !record.instructions.is_empty() {
        println!();
        println!("preparation:");
        for line in record.instructions.lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: Option<&str>, args: ListArgs, json: bool) -> CmdResult {
    let catalog = load_catalog_from(dir)?;
    let selections = SelectionStore::open(&catalog.catalog_dir).load();
    let query = args.query.as_deref().unwrap_or("");

    let rows: Vec<(&Record, Option<checklist_render::Progress>)> =
        search::filter_records(&catalog.records, query)
            .into_iter()
            .map(|record| {
                let progress =
                    checklist_render::progress(record, &selections.checked(record.id));
                (record, (progress.checked > 0).then_some(progress))
            })
            .collect();

    if json {
        let out: Vec<RecordJson> = rows
            .iter()
            .map(|(record, progress)| record_to_json(record, *progress))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    for (record, progress) in rows {
        println!("{}", format_record_line(record, progress));
    }
    Ok(())
}

fn cmd_show(dir: Option<&str>, args: ShowArgs, json: bool) -> CmdResult {
    let catalog = load_catalog_from(dir)?;
    let record = find_record(&catalog, args.id)?;
    let mut engine = open_engine(&catalog);

    let renders = engine.apply(
        Command::Open {
            id: record.id,
            checklist: args.checklist,
        },
        &catalog.records,
    );
    let render = last_full_render(renders)?;
    print_detail(record, &render, json)
}

fn cmd_check(dir: Option<&str>, args: CheckArgs, json: bool) -> CmdResult {
    let catalog = load_catalog_from(dir)?;
    let record = find_record(&catalog, args.id)?;
    let mut engine = open_engine(&catalog);

    let render = check_indices(&mut engine, record, &args.indices)?;
    print_detail(record, &render, json)
}

fn cmd_clear(dir: Option<&str>, args: ClearArgs, json: bool) -> CmdResult {
    let catalog = load_catalog_from(dir)?;
    let record = find_record(&catalog, args.id)?;
    let mut engine = open_engine(&catalog);

    let render = clear_record(&mut engine, record)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&detail_to_json(record, &render))?);
    } else {
        println!("Cleared {} (#{})", record.name, record.id);
        if let Some(counter) = render.counter() {
            println!("{}", counter);
        }
    }
    Ok(())
}

fn cmd_recovery(dir: Option<&str>, args: RecoveryArgs, json: bool) -> CmdResult {
    let catalog_dir = catalog_root(dir)?.join(CATALOG_DIR);
    let entries = recovery::read_recovery_entries(&catalog_dir, Some(args.limit.unwrap_or(10)));

    if json {
        let out: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recovery entries.");
        return Ok(());
    }
    for entry in &entries {
        for line in format_recovery_entry(entry) {
            println!("{}", line);
        }
    }
    Ok(())
}
