use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the title row: catalog name and record count
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let total = app.catalog.records.len();
    let shown = app.visible.len();

    let count = if shown == total {
        format!("  {} records", total)
    } else {
        format!("  {} of {} records", shown, total)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}", app.catalog.config.catalog.name),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
