use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::selection_store::{MemoryStore, SelectionStore};
use crate::model::{Catalog, CatalogConfig, CatalogInfo, Record};
use crate::tui::app::{App, DynStore};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three drinks; two share gin, two share lime.
pub fn sample_records() -> Vec<Record> {
    let mut gin_tonic = Record::new(1, "Gin Tonic", &["gin", "tonic", "lime"]);
    gin_tonic.kind = "Highball".into();
    gin_tonic.tags = vec!["classic".into()];
    gin_tonic.instructions = "Build over ice and stir gently.".into();

    let mut negroni = Record::new(2, "Negroni", &["gin", "campari", "vermouth"]);
    negroni.kind = "Stirred".into();
    negroni.tags = vec!["bitter".into(), "classic".into()];

    let mut mojito = Record::new(3, "Mojito", &["rum", "mint", "lime", "soda"]);
    mojito.kind = "Highball".into();
    mojito.tags = vec!["refreshing".into()];

    vec![gin_tonic, negroni, mojito]
}

pub fn sample_catalog() -> Catalog {
    Catalog {
        root: PathBuf::from("/tmp/test-mixoteca"),
        catalog_dir: PathBuf::from("/tmp/test-mixoteca/mixoteca"),
        config: CatalogConfig {
            catalog: CatalogInfo {
                name: "Test Bar".into(),
                records: "drinks.json".into(),
            },
            ui: Default::default(),
        },
        records: sample_records(),
    }
}

/// An app over the sample catalog with an in-memory store.
pub fn sample_app() -> App {
    app_with_records(sample_records())
}

/// Same as `sample_app`, with `records` in place of the sample drinks.
pub fn app_with_records(records: Vec<Record>) -> App {
    let backend: DynStore = Box::new(MemoryStore::new());
    let catalog = Catalog {
        records,
        ..sample_catalog()
    };
    App::new(catalog, SelectionStore::new(backend))
}
