//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::render::Tier;

/// Accent for a priority tier.
pub const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Red,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Green,
    }
}

/// Badge shown before a card title.
pub fn tier_badge_style(tier: Tier) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(tier_color(tier))
        .add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn cursor_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn heading_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn warning_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::LightRed)
}

pub fn toast_style(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_have_distinct_colors() {
        let colors = [
            tier_color(Tier::High),
            tier_color(Tier::Medium),
            tier_color(Tier::Low),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_focused_border_is_highlighted() {
        assert_eq!(border_style(true).fg, Some(Color::Yellow));
        assert_eq!(border_style(false).fg, None);
    }
}
