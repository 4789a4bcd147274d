//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: pane layout and the editing panes
//! - [`style`]: Theming and colors
//!
//! Everything here reads the [`Model`](crate::app::Model); nothing changes
//! editing state.

pub mod style;

mod overlays;
mod render;
mod results;
mod status;

pub use overlays::bulk_overlay_rect;
pub use render::{MainLayout, main_layout, render};

/// Rows taken by the form pane: six fields plus borders.
pub const FORM_HEIGHT: u16 = 8;
/// Most rows the live list grows to before scrolling.
pub const LIVE_MAX_HEIGHT: u16 = 12;
pub const LEFT_WIDTH_PERCENT: u16 = 50;
