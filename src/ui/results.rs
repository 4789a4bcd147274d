use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{Focus, Model, Panel};
use crate::render::{ResultView, SuggestionView, TaskCard};

use super::style;

pub fn render_results(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Results;
    let lines = match &model.results {
        Panel::Hidden => vec![Line::styled(
            "Ctrl+A analyze · Ctrl+G suggest · Ctrl+T strategy",
            style::dim_style(),
        )],
        Panel::Pending => vec![Line::styled("Analyzing…", style::dim_style())],
        Panel::Failed(message) => failed_lines(message),
        Panel::Ready(view) => result_lines(view),
    };
    #[allow(clippy::cast_possible_truncation)]
    let scroll = model.results_scroll.min(lines.len().saturating_sub(1)) as u16;

    let block = Block::default()
        .title("Results")
        .borders(Borders::ALL)
        .border_style(style::border_style(focused));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

pub fn render_suggestions(model: &Model, frame: &mut Frame, area: Rect) {
    let (title, lines) = match &model.suggestions {
        Panel::Hidden => return,
        Panel::Pending => (
            "Suggestions".to_string(),
            vec![Line::styled("Fetching suggestions…", style::dim_style())],
        ),
        Panel::Failed(message) => ("Suggestions".to_string(), failed_lines(message)),
        Panel::Ready(view) => (
            view.strategy.as_ref().map_or_else(
                || "Suggestions".to_string(),
                |strategy| format!("Suggestions ({strategy})"),
            ),
            suggestion_lines(view),
        ),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn failed_lines(message: &str) -> Vec<Line<'static>> {
    vec![Line::styled(format!("Failed: {message}"), style::error_style())]
}

pub(super) fn result_lines(view: &ResultView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(view.header.clone(), style::heading_style())];
    lines.extend(
        view.warnings
            .iter()
            .map(|w| Line::styled(w.clone(), style::warning_style())),
    );
    lines.push(Line::raw(""));

    if let Some(placeholder) = view.placeholder() {
        lines.push(Line::styled(placeholder, style::dim_style()));
        return lines;
    }
    for card in &view.cards {
        lines.extend(card_lines(card));
        lines.push(Line::raw(""));
    }
    lines
}

fn card_lines(card: &TaskCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", card.tier.label().to_uppercase()),
                style::tier_badge_style(card.tier),
            ),
            Span::raw(" "),
            Span::styled(
                card.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                card.score_label(),
                Style::default().fg(style::tier_color(card.tier)),
            ),
        ]),
        Line::styled(format!("  {}", card.details), style::dim_style()),
    ];
    if !card.components.is_empty() {
        lines.push(Line::raw(format!("  {}", card.components_line())));
    }
    if !card.explanation.is_empty() {
        lines.push(Line::styled(
            format!("  {}", card.explanation),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    lines
}

pub(super) fn suggestion_lines(view: &SuggestionView) -> Vec<Line<'static>> {
    if let Some(placeholder) = view.placeholder() {
        return vec![Line::styled(placeholder, style::dim_style())];
    }
    view.entries
        .iter()
        .enumerate()
        .flat_map(|(rank, entry)| {
            [
                Line::from(vec![
                    Span::raw(format!("{}. ", rank + 1)),
                    Span::styled(
                        entry.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        entry.score_label(),
                        Style::default().fg(style::tier_color(entry.tier)),
                    ),
                ]),
                Line::styled(format!("   {}", entry.reason), style::dim_style()),
            ]
        })
        .collect()
}
