//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering and request workers

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, Panel, ToastLevel, sample_text};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::analysis::{DEFAULT_API_BASE, DEFAULT_STRATEGY};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    initial_text: String,
    api_base: String,
    strategy: String,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application editing `initial_text`.
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self {
            initial_text: initial_text.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            strategy: DEFAULT_STRATEGY.to_string(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Base URL of the prioritization service.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Strategy selected at startup.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
