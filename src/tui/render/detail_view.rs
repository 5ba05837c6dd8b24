use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, DetailRows};
use crate::util::unicode::{truncate_to_width, wrap_to_width};

use super::centered_rect;

/// Cells taken by ` ▸ [x] ` before a checklist label
const CHECKLIST_PREFIX: usize = 7;
/// Cells taken by `   • ` before a plain label
const PLAIN_PREFIX: usize = 5;

/// Render the open record as a centered popup over the grid.
///
/// The body (subtitle, ingredients, preparation) scrolls to keep the row
/// cursor in view; the counter and key hints sit in a fixed footer.
pub fn render_detail_view(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.detail_record().is_none() {
        return;
    }
    let popup = centered_rect(70, 80, area);
    let inner = Block::default().borders(Borders::ALL).inner(popup);

    let footer = footer_lines(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(footer.len() as u16),
        ])
        .split(inner);

    let (body, row_start) = body_lines(app, inner.width as usize);
    if let Some(detail) = app.detail.as_mut() {
        detail.scroll = scroll_to_cursor(
            detail.scroll,
            detail.cursor,
            row_start,
            detail.rows.len(),
            body.len(),
            chunks[0].height as usize,
        );
    }

    let app = &*app;
    let (Some(detail), Some(record)) = (app.detail.as_ref(), app.detail_record()) else {
        return;
    };
    let bg = app.theme.background;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            format!(" {} ", truncate_to_width(&record.name, popup.width.saturating_sub(4) as usize)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    frame.render_widget(
        Paragraph::new(body)
            .style(Style::default().bg(bg))
            .scroll((detail.scroll.min(u16::MAX as usize) as u16, 0)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().bg(bg)),
        chunks[1],
    );
}

/// Scrollable popup body, one entry per screen line, plus the index of
/// the line holding the first ingredient row
fn body_lines(app: &App, width: usize) -> (Vec<Line<'static>>, usize) {
    let (Some(detail), Some(record)) = (app.detail.as_ref(), app.detail_record()) else {
        return (Vec::new(), 0);
    };
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let heading_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'static>> = Vec::new();

    let subtitle = record.subtitle();
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_to_width(&subtitle, width.saturating_sub(1))),
            dim_style,
        )));
        lines.push(Line::from(""));
    }

    let mut heading = vec![Span::styled(" Ingredients", heading_style)];
    if matches!(detail.rows, DetailRows::Checklist(_)) {
        heading.push(Span::styled("  checklist", dim_style));
    }
    lines.push(Line::from(heading));
    let row_start = lines.len();

    if detail.rows.is_empty() {
        lines.push(Line::from(Span::styled("   (no ingredients)", dim_style)));
    }

    match &detail.rows {
        DetailRows::Plain(rows) => {
            let label_width = width.saturating_sub(PLAIN_PREFIX);
            for row in rows {
                lines.push(Line::from(vec![
                    Span::styled("   \u{2022} ", dim_style),
                    Span::styled(truncate_to_width(&row.label, label_width), text_style),
                ]));
            }
        }
        DetailRows::Checklist(rows) => {
            let label_width = width.saturating_sub(CHECKLIST_PREFIX);
            for (i, row) in rows.iter().enumerate() {
                let marker = if i == detail.cursor {
                    Span::styled(" \u{25B8} ", Style::default().fg(app.theme.highlight).bg(bg))
                } else {
                    Span::styled("   ", text_style)
                };
                let (checkbox, label_style) = if row.checked {
                    (
                        Span::styled("[x] ", Style::default().fg(app.theme.green).bg(bg)),
                        dim_style,
                    )
                } else {
                    (Span::styled("[ ] ", text_style), text_style)
                };
                lines.push(Line::from(vec![
                    marker,
                    checkbox,
                    Span::styled(truncate_to_width(&row.label, label_width), label_style),
                ]));
            }
        }
    }

    if !record.instructions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Preparation", heading_style)));
        for text_line in wrap_to_width(&record.instructions, width.saturating_sub(1).max(1)) {
            lines.push(Line::from(Span::styled(format!(" {}", text_line), text_style)));
        }
    }

    (lines, row_start)
}

/// Counter and key hints, pinned below the body
fn footer_lines(app: &App) -> Vec<Line<'static>> {
    let Some(detail) = app.detail.as_ref() else {
        return Vec::new();
    };
    let bg = app.theme.background;
    let mut lines = Vec::new();

    if let Some(counter) = &detail.counter {
        let complete = matches!(
            &detail.rows,
            DetailRows::Checklist(rows) if !rows.is_empty() && rows.iter().all(|r| r.checked)
        );
        let color = if complete {
            app.theme.green
        } else {
            app.theme.yellow
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", counter),
            Style::default().fg(color).bg(bg),
        )));
    }

    if app.catalog.config.ui.show_key_hints {
        let hints = match detail.rows {
            DetailRows::Plain(_) => " m checklist  esc close",
            DetailRows::Checklist(_) => " space toggle  x clear  m plain  esc close",
        };
        lines.push(Line::from(Span::styled(
            hints,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    lines
}

/// New scroll offset for a body of `total` lines shown `visible` at a time,
/// with ingredient rows starting at line `row_start`. The cursor row stays
/// on screen; the first row scrolls back to the top so the headings show,
/// and the last row scrolls down as far as it can so the preparation shows.
fn scroll_to_cursor(
    scroll: usize,
    cursor: usize,
    row_start: usize,
    row_count: usize,
    total: usize,
    visible: usize,
) -> usize {
    if visible == 0 {
        return 0;
    }
    let max_scroll = total.saturating_sub(visible);
    let cursor_line = row_start + cursor;
    let mut scroll = scroll.min(max_scroll);

    if cursor == 0 {
        scroll = 0;
    } else if cursor_line < scroll {
        scroll = cursor_line;
    }
    if cursor_line >= scroll + visible {
        scroll = cursor_line + 1 - visible;
    }
    if row_count > 0 && cursor + 1 == row_count {
        scroll = scroll.max(max_scroll.min(cursor_line));
    }
    scroll
}
