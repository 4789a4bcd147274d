// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. tasks::TaskRecord)
    clippy::module_name_repetitions
)]

//! # Taskdeck
//!
//! A terminal editor for task lists, scored by a remote prioritization
//! service.
//!
//! The task list is a JSON text buffer you can edit directly or through a
//! form. A live list mirrors the buffer newest-first, and the analyze and
//! suggest endpoints turn it into tiered result cards and ranked
//! suggestions.
//!
//! ## Architecture
//!
//! Taskdeck uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The editing model underneath is itself a pure state machine
//! ([`tasks::apply`]) that runs without a terminal.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`tasks`]: Task records, buffer parsing and editing commands
//! - [`editor`]: Rope-backed text buffer
//! - [`analysis`]: HTTP client for the prioritization service
//! - [`render`]: View models for results and suggestions
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults
//! - [`perf`]: Timing and debug log

pub mod analysis;
pub mod app;
pub mod config;
pub mod editor;
pub mod perf;
pub mod render;
pub mod tasks;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::tasks::{EditCommand, EditorState, ParsedBuffer, TaskRecord, apply};
}
