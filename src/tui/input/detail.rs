use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::checklist::Command;
use crate::tui::app::App;

pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.dispatch(Command::Close),

        KeyCode::Tab | KeyCode::Char('m') => app.dispatch(Command::ToggleMode),

        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_row_at_cursor(),

        KeyCode::Char('x') => app.dispatch(Command::ClearCurrent),

        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Home | KeyCode::Char('g') => move_cursor(app, isize::MIN),
        KeyCode::End | KeyCode::Char('G') => move_cursor(app, isize::MAX),

        _ => {}
    }
}

/// Move the row cursor by `delta`, clamped to the row list
fn move_cursor(app: &mut App, delta: isize) {
    let Some(detail) = app.detail.as_mut() else {
        return;
    };
    let last = detail.rows.len().saturating_sub(1);
    detail.cursor = detail.cursor.saturating_add_signed(delta).min(last);
}
