use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::analysis::Endpoint;
use crate::app::{Focus, Model};
use crate::tasks::{EditMode, LiveList};

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let focus = match model.focus {
        Focus::Buffer => "buffer",
        Focus::Form => "form",
        Focus::LiveList => "list",
        Focus::Results => "results",
    };
    let tasks = match model.editor.live() {
        LiveList::Warning(_) => "tasks: invalid".to_string(),
        LiveList::Entries(entries) => format!("tasks: {}", entries.len()),
    };
    let mode = match model.editor.mode() {
        EditMode::Add => String::new(),
        EditMode::Edit(id) => format!("  [editing {id}]"),
    };
    let mut pending = String::new();
    if model.in_flight.pending(Endpoint::Analyze).is_some() {
        pending.push_str("  [analyzing]");
    }
    if model.in_flight.pending(Endpoint::Suggest).is_some() {
        pending.push_str("  [suggesting]");
    }

    let status = format!(
        " taskdeck  {focus}  {tasks}  strategy: {}{mode}{pending}  F1:help",
        model.strategy
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = style::toast_style(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
