use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{Focus, Model};
use crate::editor::TextBuffer;
use crate::tasks::{EditMode, FormField, LiveList};

use super::{FORM_HEIGHT, LEFT_WIDTH_PERCENT, LIVE_MAX_HEIGHT, overlays, results, status, style};

/// Where each pane goes for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub buffer: Rect,
    pub form: Rect,
    pub live: Rect,
    pub results: Rect,
    /// Only present while the suggestions panel is shown.
    pub suggestions: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn main_layout(model: &Model, area: Rect) -> MainLayout {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let body = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1.min(area.height),
        ..area
    };
    let toast = toast_active.then(|| Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1.min(area.height.saturating_sub(1)),
        ..area
    });

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LEFT_WIDTH_PERCENT),
            Constraint::Percentage(100 - LEFT_WIDTH_PERCENT),
        ])
        .split(body);

    #[allow(clippy::cast_possible_truncation)]
    let live_rows = model.editor.live().row_count().max(1).min(usize::from(LIVE_MAX_HEIGHT)) as u16;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Length(live_rows + 2),
        ])
        .split(columns[0]);

    let (results, suggestions) = if model.suggestions.is_hidden() {
        (columns[1], None)
    } else {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);
        (right[0], Some(right[1]))
    };

    MainLayout {
        buffer: left[0],
        form: left[1],
        live: left[2],
        results,
        suggestions,
        toast,
        status,
    }
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = main_layout(model, area);

    model.scroll_buffer_to_cursor(layout.buffer.height.saturating_sub(2) as usize);

    render_buffer(model, frame, layout.buffer);
    render_form(model, frame, layout.form);
    render_live_list(model, frame, layout.live);
    results::render_results(model, frame, layout.results);
    if let Some(rect) = layout.suggestions {
        results::render_suggestions(model, frame, rect);
    }
    if let Some(rect) = layout.toast {
        status::render_toast_bar(model, frame, rect);
    }
    status::render_status_bar(model, frame, layout.status);

    if let Some(bulk) = &model.bulk_input {
        overlays::render_bulk_overlay(bulk, frame, area);
    }
    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn pane(title: impl Into<Line<'static>>, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style::border_style(focused))
}

/// Lines of `buffer` from `start`, with the cursor drawn when `show_cursor`.
pub(super) fn buffer_lines(
    buffer: &TextBuffer,
    start: usize,
    height: usize,
    show_cursor: bool,
) -> Vec<Line<'static>> {
    let gutter = line_number_width(buffer.line_count()) as usize;
    let cursor = buffer.cursor();
    let end = (start + height).min(buffer.line_count());

    (start..end)
        .map(|line_idx| {
            let text = buffer.line_at(line_idx).unwrap_or_default();
            let mut spans = vec![Span::styled(
                format!("{:>gutter$} ", line_idx + 1),
                Style::default().fg(Color::DarkGray),
            )];
            if show_cursor && line_idx == cursor.line {
                let col = floor_boundary(&text, cursor.col);
                let (before, rest) = text.split_at(col);
                let mut chars = rest.chars();
                let under = chars.next().map_or_else(|| " ".to_string(), String::from);
                let after: String = chars.collect();
                if !before.is_empty() {
                    spans.push(Span::raw(before.to_string()));
                }
                spans.push(Span::styled(under, style::cursor_style()));
                if !after.is_empty() {
                    spans.push(Span::raw(after));
                }
            } else {
                spans.push(Span::raw(text));
            }
            Line::from(spans)
        })
        .collect()
}

fn floor_boundary(text: &str, col: usize) -> usize {
    let mut col = col.min(text.len());
    while !text.is_char_boundary(col) {
        col -= 1;
    }
    col
}

fn render_buffer(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Buffer && model.bulk_input.is_none();
    let height = area.height.saturating_sub(2) as usize;
    let lines = buffer_lines(model.editor.buffer(), model.buffer_scroll, height, focused);
    let title = if matches!(model.editor.live(), LiveList::Warning(_)) {
        Line::from(vec![
            Span::raw("Tasks JSON "),
            Span::styled("(invalid)", style::warning_style()),
        ])
    } else {
        Line::raw("Tasks JSON")
    };
    frame.render_widget(Paragraph::new(lines).block(pane(title, focused)), area);
}

fn render_form(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Form;
    let form = model.editor.form();
    let label_width = FormField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let selected = field == model.form_field;
            let marker = if focused && selected { ">" } else { " " };
            let value = form.field(field);
            let mut spans = vec![
                Span::raw(format!("{marker}{:<label_width$} ", field.label())),
                Span::raw(value.to_string()),
            ];
            if focused && selected {
                spans.push(Span::styled(" ", style::cursor_style()));
            }
            Line::from(spans)
        })
        .collect();

    let title = match form.mode {
        EditMode::Add => "Add task".to_string(),
        EditMode::Edit(ref id) => format!("Edit {id}"),
    };
    frame.render_widget(Paragraph::new(lines).block(pane(title, focused)), area);
}

fn render_live_list(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::LiveList;
    let visible_rows = area.height.saturating_sub(2) as usize;
    // one column for the selection marker
    let label_width = area.width.saturating_sub(3) as usize;

    let lines: Vec<Line> = match model.editor.live() {
        LiveList::Warning(warning) => vec![Line::styled(warning.clone(), style::warning_style())],
        LiveList::Entries(entries) if entries.is_empty() => {
            vec![Line::styled("No tasks yet", style::dim_style())]
        }
        LiveList::Entries(entries) => {
            let start = (model.live_selected + 1).saturating_sub(visible_rows);
            entries
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_rows)
                .map(|(i, entry)| {
                    let label = fit_width(&entry.label(), label_width);
                    if focused && i == model.live_selected {
                        Line::styled(format!(">{label}"), style::selected_style())
                    } else {
                        Line::raw(format!(" {label}"))
                    }
                })
                .collect()
        }
    };

    let block = pane("Tasks (newest first)", focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Cut `text` to at most `max` terminal columns, marking the cut with `…`.
pub(super) fn fit_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max > 0 {
        out.push('…');
    }
    out
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else {
        5
    }
}
