use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::analysis::{DEFAULT_API_BASE, DEFAULT_STRATEGY, InFlight, Job};
use crate::editor::TextBuffer;
use crate::render::{ResultView, SuggestionView};
use crate::tasks::{EditorState, FormField, IdSource, SystemIds, encode_tasks, sample_tasks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives plain keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Buffer,
    Form,
    LiveList,
    Results,
}

impl Focus {
    const ORDER: [Self; 4] = [Self::Buffer, Self::Form, Self::LiveList, Self::Results];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// What the results pane is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel<V> {
    #[default]
    Hidden,
    Pending,
    Ready(V),
    Failed(String),
}

impl<V> Panel<V> {
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Buffer text, form and live list
    pub editor: EditorState,
    pub focus: Focus,
    /// Form field under the cursor
    pub form_field: FormField,
    /// Selected row in the live list
    pub live_selected: usize,
    /// First visible line of the buffer editor
    pub buffer_scroll: usize,
    /// First visible line of the results pane
    pub results_scroll: usize,
    pub results: Panel<ResultView>,
    pub suggestions: Panel<SuggestionView>,
    /// Strategy sent with the next request
    pub strategy: String,
    /// Service base URL, shown in help
    pub api_base: String,
    pub in_flight: InFlight,
    /// Requests issued by `update` and not yet handed to a worker
    pub(super) outbox: Vec<Job>,
    /// Text of the bulk import overlay while it is open
    pub bulk_input: Option<TextBuffer>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
    ids: Box<dyn IdSource>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("editor", &self.editor)
            .field("focus", &self.focus)
            .field("strategy", &self.strategy)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model editing `text`.
    pub fn new(text: &str) -> Self {
        Self {
            editor: EditorState::new(text),
            ..Self::default()
        }
    }

    /// Create a model holding the built-in sample tasks.
    pub fn with_sample() -> Self {
        Self::new(&sample_text())
    }

    /// Replace the clock and randomness used for generated ids.
    #[must_use]
    pub fn with_ids(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub(super) fn ids(&self) -> &dyn IdSource {
        self.ids.as_ref()
    }

    /// Requests waiting to be dispatched, oldest first.
    pub(super) fn take_outbox(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.outbox)
    }

    pub fn pending_requests(&self) -> &[Job] {
        &self.outbox
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Keep the live list selection on a real row after the list changes.
    pub(super) fn clamp_live_selection(&mut self) {
        let rows = self.editor.live().entries().len();
        self.live_selected = self.live_selected.min(rows.saturating_sub(1));
    }

    /// Scroll the buffer view so the cursor line is inside `height` rows.
    pub fn scroll_buffer_to_cursor(&mut self, height: usize) {
        let line = self.editor.buffer().cursor().line;
        if line < self.buffer_scroll {
            self.buffer_scroll = line;
        } else if height > 0 && line >= self.buffer_scroll + height {
            self.buffer_scroll = line + 1 - height;
        }
    }
}

/// The sample tasks as pretty-printed buffer text.
pub fn sample_text() -> String {
    encode_tasks(&sample_tasks()).unwrap_or_else(|_| "[]".to_string())
}

impl Default for Model {
    fn default() -> Self {
        Self {
            editor: EditorState::default(),
            focus: Focus::default(),
            form_field: FormField::Id,
            live_selected: 0,
            buffer_scroll: 0,
            results_scroll: 0,
            results: Panel::Hidden,
            suggestions: Panel::Hidden,
            strategy: DEFAULT_STRATEGY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            in_flight: InFlight::default(),
            outbox: Vec::new(),
            bulk_input: None,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            should_quit: false,
            toast: None,
            ids: Box::new(SystemIds),
        }
    }
}
