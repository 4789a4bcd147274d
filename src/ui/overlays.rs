use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::TextBuffer;

use super::render::buffer_lines;
use super::style;

pub fn bulk_overlay_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(16).max(40);
    let popup_height = area.height.saturating_sub(8).max(8);
    centered_popup_rect(popup_width, popup_height, area)
}

pub fn render_bulk_overlay(bulk: &TextBuffer, frame: &mut Frame, area: Rect) {
    let popup = bulk_overlay_rect(area);
    let block = Block::default()
        .title("Bulk import: one task title per line")
        .borders(Borders::ALL)
        .border_style(style::border_style(true))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let content_height = inner.height.saturating_sub(1);
    let cursor_line = bulk.cursor().line;
    let start = (cursor_line + 1).saturating_sub(content_height as usize);
    let lines = buffer_lines(bulk, start, content_height as usize, true);
    frame.render_widget(
        Paragraph::new(lines),
        Rect {
            height: content_height,
            ..inner
        },
    );

    let footer_area = Rect {
        y: inner.y + content_height,
        height: 1.min(inner.height),
        ..inner
    };
    let footer = Line::styled("Ctrl+S import \u{2502} Esc cancel", style::dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Anywhere", section_style));
    lines.push(Line::raw("  Tab / Shift+Tab     Switch pane"));
    lines.push(Line::raw("  Ctrl+A              Analyze tasks"));
    lines.push(Line::raw("  Ctrl+G              Suggest top tasks"));
    lines.push(Line::raw("  Ctrl+T              Next strategy"));
    lines.push(Line::raw("  Ctrl+L              Load sample tasks"));
    lines.push(Line::raw("  Ctrl+B              Bulk import titles"));
    lines.push(Line::raw("  Ctrl+R              Clear results"));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw("  Ctrl+Q / Ctrl+C     Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Form", section_style));
    lines.push(Line::raw("  Up/Down             Select field"));
    lines.push(Line::raw("  Enter               Add, or save while editing"));
    lines.push(Line::raw("  Esc                 Cancel edit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Task list", section_style));
    lines.push(Line::raw("  Up/Down             Select task"));
    lines.push(Line::raw("  Enter / e           Edit in form"));
    lines.push(Line::raw("  d / Delete          Remove every task with this id"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Service", section_style));
    lines.push(Line::raw(format!("  API: {}", model.api_base)));
    lines.push(Line::raw(format!("  Strategy: {}", model.strategy)));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
