use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (spans, hint) = match app.mode {
        Mode::Navigate => {
            // A kept filter shows dimmed, with the match count on the right
            if let Some(ref query) = app.filter {
                let spans = vec![Span::styled(
                    format!("/{}", query),
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                let hint = format!(
                    "{} of {} shown",
                    app.visible.len(),
                    app.catalog.records.len()
                );
                (spans, Some(hint))
            } else if app.catalog.config.ui.show_key_hints {
                let spans = vec![Span::styled(
                    " / search  enter open  c checklist  q quit",
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                (spans, None)
            } else {
                (Vec::new(), None)
            }
        }
        Mode::Search => {
            // Search prompt: /query▌
            let spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            ];
            (spans, Some("Enter keep  Esc clear".to_string()))
        }
    };

    let mut spans = spans;
    if let Some(hint) = hint {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(&hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
