use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::catalog_io::{CATALOG_DIR, discover_catalog, load_catalog};
use crate::io::selection_store::{FileStore, KeyValueStore, SelectionStore};
use crate::model::{Catalog, Record, RecordId, SelectionMap};
use crate::ops::checklist::{ChecklistEngine, ChecklistMode, Command, Render};
use crate::ops::checklist_render::{self, ChecklistRow, PlainRow, Progress};
use crate::ops::search;

use super::input;
use super::render;
use super::theme::Theme;

/// Store backend used by the TUI (a file store at runtime, memory in tests)
pub type DynStore = Box<dyn KeyValueStore>;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Rows currently shown in the detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRows {
    Plain(Vec<PlainRow>),
    Checklist(Vec<ChecklistRow>),
}

impl DetailRows {
    pub fn len(&self) -> usize {
        match self {
            DetailRows::Plain(rows) => rows.len(),
            DetailRows::Checklist(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The open detail overlay, rebuilt from engine renders
#[derive(Debug, Clone)]
pub struct DetailState {
    pub record_id: RecordId,
    pub rows: DetailRows,
    /// Progress counter text (checklist mode only)
    pub counter: Option<String>,
    /// Row cursor; in plain mode it only drives scrolling
    pub cursor: usize,
    /// First visible line of the popup body, kept around the cursor
    pub scroll: usize,
}

/// Main application state
pub struct App {
    pub catalog: Catalog,
    pub engine: ChecklistEngine<DynStore>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Search mode: query being typed (filters live)
    pub search_input: String,
    /// Filter kept after leaving search mode
    pub filter: Option<String>,
    /// Ids of the records passing the current filter, in catalog order
    pub visible: Vec<RecordId>,
    /// Cursor index into `visible`
    pub cursor: usize,
    /// First visible grid row
    pub grid_scroll: usize,
    /// Columns in the last rendered grid (for up/down movement)
    pub grid_columns: usize,
    /// Detail overlay, when a record is open
    pub detail: Option<DetailState>,
    /// Stored selections as of the last engine command, for card badges
    pub selections: SelectionMap,
}

impl App {
    pub fn new(catalog: Catalog, store: SelectionStore<DynStore>) -> Self {
        let theme = Theme::from_config(&catalog.config.ui);
        let engine = ChecklistEngine::new(store);
        let selections = engine.store().load();
        let visible = catalog.records.iter().map(|r| r.id).collect();

        App {
            catalog,
            engine,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            search_input: String::new(),
            filter: None,
            visible,
            cursor: 0,
            grid_scroll: 0,
            grid_columns: 1,
            detail: None,
            selections,
        }
    }

    /// Query in effect: live input while searching, else the kept filter
    pub fn active_query(&self) -> &str {
        match self.mode {
            Mode::Search => &self.search_input,
            Mode::Navigate => self.filter.as_deref().unwrap_or(""),
        }
    }

    /// Highlight regex for the active query
    pub fn active_search_re(&self) -> Option<Regex> {
        search::highlight_regex(self.active_query())
    }

    /// Recompute `visible` from the active query, keeping the cursor on the
    /// same record when it is still visible.
    pub fn refresh_filter(&mut self) {
        let current = self.selected_record().map(|r| r.id);
        self.visible = search::filter_records(&self.catalog.records, self.active_query())
            .iter()
            .map(|r| r.id)
            .collect();
        self.cursor = current
            .and_then(|id| self.visible.iter().position(|v| *v == id))
            .unwrap_or(0);
        self.grid_scroll = 0;
    }

    pub fn visible_records(&self) -> Vec<&Record> {
        self.visible
            .iter()
            .filter_map(|id| self.catalog.find(*id))
            .collect()
    }

    /// Record under the grid cursor
    pub fn selected_record(&self) -> Option<&Record> {
        let id = self.visible.get(self.cursor)?;
        self.catalog.find(*id)
    }

    /// Record shown in the detail overlay
    pub fn detail_record(&self) -> Option<&Record> {
        let detail = self.detail.as_ref()?;
        self.catalog.find(detail.record_id)
    }

    /// Stored progress for a card badge (`None` when nothing is checked)
    pub fn card_progress(&self, record: &Record) -> Option<Progress> {
        let checked = self.selections.checked(record.id);
        let progress = checklist_render::progress(record, &checked);
        (progress.checked > 0).then_some(progress)
    }

    pub fn detail_mode(&self) -> ChecklistMode {
        self.engine.mode()
    }

    /// Forward a command to the engine and present what it returns
    pub fn dispatch(&mut self, command: Command) {
        let renders = self.engine.apply(command, &self.catalog.records);
        for render in renders {
            self.present(render);
        }
        self.selections = self.engine.store().load();
    }

    /// Open the record under the grid cursor
    pub fn open_selected(&mut self, checklist: bool) {
        if let Some(id) = self.selected_record().map(|r| r.id) {
            self.dispatch(Command::Open { id, checklist });
        }
    }

    /// Toggle the checklist row under the detail cursor
    pub fn toggle_row_at_cursor(&mut self) {
        let command = match &self.detail {
            Some(DetailState {
                rows: DetailRows::Checklist(rows),
                cursor,
                ..
            }) => checklist_render::command_for_row(rows, *cursor),
            _ => None,
        };
        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    /// Row cursor and scroll to carry into a rebuild of `record`'s list
    fn carried_position(&self, record: RecordId, row_count: usize) -> (usize, usize) {
        match &self.detail {
            Some(d) if d.record_id == record => {
                (d.cursor.min(row_count.saturating_sub(1)), d.scroll)
            }
            _ => (0, 0),
        }
    }

    fn present(&mut self, render: Render) {
        match render {
            Render::Plain { record, rows } => {
                let (cursor, scroll) = self.carried_position(record, rows.len());
                self.detail = Some(DetailState {
                    record_id: record,
                    rows: DetailRows::Plain(rows),
                    counter: None,
                    cursor,
                    scroll,
                });
            }
            Render::Checklist {
                record,
                rows,
                progress,
            } => {
                let (cursor, scroll) = self.carried_position(record, rows.len());
                self.detail = Some(DetailState {
                    record_id: record,
                    rows: DetailRows::Checklist(rows),
                    counter: Some(progress.label()),
                    cursor,
                    scroll,
                });
            }
            Render::Counter {
                record,
                index,
                checked,
                progress,
            } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.record_id == record) else {
                    return;
                };
                if let DetailRows::Checklist(rows) = &mut detail.rows
                    && let Some(row) = rows.iter_mut().find(|r| r.index == index)
                {
                    row.checked = checked;
                }
                detail.counter = Some(progress.label());
            }
            Render::Closed => {
                self.detail = None;
            }
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.catalog.catalog_dir) else {
        return;
    };

    if let Some(query) = ui_state.last_search.filter(|q| !q.trim().is_empty()) {
        app.filter = Some(query);
        app.refresh_filter();
    }
    if let Some(id) = ui_state.cursor_record
        && let Some(pos) = app.visible.iter().position(|v| *v == id)
    {
        app.cursor = pos;
    }
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        last_search: app.filter.clone(),
        cursor_record: app.selected_record().map(|r| r.id),
    };

    if let Err(e) = write_ui_state(&app.catalog.catalog_dir, &ui_state) {
        tracing::warn!("could not save UI state: {}", e);
    }
}

/// Run the TUI application
pub fn run(catalog_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match catalog_dir {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };
    let root = discover_catalog(&start)?;

    // Logging goes to a file under the catalog so it never draws over the UI.
    // The guard flushes buffered lines when run() returns.
    let logs_dir = root.join(CATALOG_DIR).join(".logs");
    let _log_guard = crate::logging::init_file_logging(&logs_dir);
    tracing::info!("mixo starting");

    let catalog = load_catalog(&root)?;

    let backend: DynStore = Box::new(FileStore::new(catalog.store_dir()));
    let store = SelectionStore::new(backend).with_recovery_log(&catalog.catalog_dir);
    let mut app = App::new(catalog, store);
    tracing::info!(records = app.selections.len(), "stored selections loaded");
    restore_ui_state(&mut app);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
