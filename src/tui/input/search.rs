use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Drop the filter entirely
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
            app.filter = None;
            app.refresh_filter();
        }

        // Keep the filter (a blank query clears it)
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
            let query = std::mem::take(&mut app.search_input);
            app.filter = (!query.trim().is_empty()).then_some(query);
            app.refresh_filter();
        }

        KeyCode::Backspace => {
            app.search_input.pop();
            app.refresh_filter();
        }

        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.refresh_filter();
        }

        _ => {}
    }
}
