use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let count = app.visible.len();
    let columns = app.grid_columns.max(1);

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input = app.filter.take().unwrap_or_default();
            app.refresh_filter();
        }

        // Open the record, plain or straight into the checklist
        KeyCode::Enter => app.open_selected(false),
        KeyCode::Char('c') => app.open_selected(true),

        KeyCode::Left | KeyCode::Char('h') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.cursor >= columns {
                app.cursor -= columns;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.cursor + columns < count {
                app.cursor += columns;
            }
        }
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.cursor = count.saturating_sub(1),

        _ => {}
    }
}
