use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use regex::Regex;

use crate::model::Record;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::push_highlighted_spans;

/// Card height including borders: name, subtitle, badge
const CARD_HEIGHT: u16 = 5;
/// Gap between card columns
const CARD_GAP: u16 = 1;

/// Number of card columns that fit in `width`
pub fn grid_columns(width: u16, card_width: u16) -> usize {
    let step = card_width + CARD_GAP;
    ((width + CARD_GAP) / step).max(1) as usize
}

/// Render the record grid. Records the column count so the cursor can move
/// by rows, and scrolls to keep the cursor card in view.
pub fn render_grid_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.visible.is_empty() {
        let line = Line::from(Span::styled(
            " No records found.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let card_width = app.catalog.config.ui.card_width.clamp(12, area.width.max(12));
    let columns = grid_columns(area.width, card_width);
    app.grid_columns = columns;

    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = app.cursor / columns;
    if cursor_row < app.grid_scroll {
        app.grid_scroll = cursor_row;
    } else if cursor_row >= app.grid_scroll + visible_rows {
        app.grid_scroll = cursor_row + 1 - visible_rows;
    }

    let app = &*app;
    let search_re = app.active_search_re();

    for (i, record) in app.visible_records().into_iter().enumerate() {
        let row = i / columns;
        if row < app.grid_scroll || row >= app.grid_scroll + visible_rows {
            continue;
        }
        let col = (i % columns) as u16;
        let x = area.x + col * (card_width + CARD_GAP);
        let y = area.y + (row - app.grid_scroll) as u16 * CARD_HEIGHT;
        if x >= area.right() || y >= area.bottom() {
            continue;
        }
        let rect = Rect::new(
            x,
            y,
            card_width.min(area.right() - x),
            CARD_HEIGHT.min(area.bottom() - y),
        );
        render_card(frame, app, record, i == app.cursor, rect, search_re.as_ref());
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    record: &Record,
    selected: bool,
    area: Rect,
    search_re: Option<&Regex>,
) {
    let card_bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if selected {
        Style::default().fg(app.theme.selection_border).bg(card_bg)
    } else {
        Style::default().fg(app.theme.dim).bg(card_bg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(card_bg));

    let name_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(card_bg)
        .add_modifier(Modifier::BOLD);
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut name_spans = Vec::new();
    push_highlighted_spans(
        &mut name_spans,
        &truncate_to_width(&record.name, inner_width),
        name_style,
        match_style,
        search_re,
    );

    let subtitle = Line::from(Span::styled(
        truncate_to_width(&record.subtitle(), inner_width),
        Style::default().fg(app.theme.dim).bg(card_bg),
    ));

    let badge = match app.card_progress(record) {
        Some(progress) => {
            let color = if progress.is_complete() {
                app.theme.green
            } else {
                app.theme.yellow
            };
            Span::styled(
                truncate_to_width(&format!("\u{2713} {}", progress.label()), inner_width),
                Style::default().fg(color).bg(card_bg),
            )
        }
        None => Span::styled(
            truncate_to_width(&item_count_label(record.items.len()), inner_width),
            Style::default().fg(app.theme.text).bg(card_bg),
        ),
    };

    let lines = vec![Line::from(name_spans), subtitle, Line::from(badge)];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn item_count_label(count: usize) -> String {
    match count {
        1 => "1 ingredient".to_string(),
        n => format!("{} ingredients", n),
    }
}
