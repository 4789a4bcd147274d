//! The editing model: buffer text, form, and the live list derived from them.
//!
//! [`apply`] is the only way state changes. It takes the state by value and
//! returns the next one, so every command is one logical mutation and the
//! whole model can be driven without a terminal.

use std::fmt;

use crate::editor::{Direction, TextBuffer};

use super::codec::{ParsedBuffer, read_tasks};
use super::form::{EditMode, FormField, FormState};
use super::ids::IdSource;
use super::live::LiveList;
use super::ops::{self, EditError, SaveOutcome};

/// Everything that can change the editing model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    // Direct text edits
    InsertChar(char),
    InsertText(String),
    Newline,
    DeleteBack,
    DeleteForward,
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    /// Replace the whole text, e.g. with the sample or an imported file.
    ReplaceText(String),

    // Form
    SetField(FormField, String),
    /// Load the record at this buffer position into the form.
    LoadIntoForm(usize),
    Submit,
    CancelEdit,

    // Structural edits
    Remove(String),
    BulkImport(String),
}

/// What a successful command did, for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing worth reporting.
    Quiet,
    Added(String),
    Saved(String),
    /// Edit target was gone, so the record went to the end instead.
    SavedAsNew(String),
    Removed(String, usize),
    BulkAdded(usize),
    Editing(String),
    EditCancelled,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => Ok(()),
            Self::Added(id) => write!(f, "Added {id}"),
            Self::Saved(id) => write!(f, "Saved {id}"),
            Self::SavedAsNew(id) => write!(f, "Saved {id} (original not found, appended)"),
            Self::Removed(id, _) => write!(f, "Removed {id}"),
            Self::BulkAdded(n) => write!(f, "Bulk added {n} tasks"),
            Self::Editing(id) => write!(f, "Editing {id}, make changes and submit to save"),
            Self::EditCancelled => write!(f, "Edit cancelled"),
        }
    }
}

pub type Outcome = Result<Notice, EditError>;

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    buffer: TextBuffer,
    form: FormState,
    live: LiveList,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        let mut state = Self {
            buffer: TextBuffer::from_text(text),
            ..Self::default()
        };
        state.refresh_live();
        state
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn parsed(&self) -> ParsedBuffer {
        read_tasks(&self.buffer.text())
    }

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    pub const fn mode(&self) -> &EditMode {
        &self.form.mode
    }

    pub const fn live(&self) -> &LiveList {
        &self.live
    }

    /// Replace the text with a structural rewrite and re-derive the live list.
    fn write_text(&mut self, text: &str) {
        self.buffer.replace_text(text);
        self.refresh_live();
    }

    fn refresh_live(&mut self) {
        self.live = LiveList::derive(&self.parsed());
    }

    fn clear_form(&mut self) {
        self.form = FormState::default();
    }
}

/// Apply one command and return the next state with its outcome.
///
/// A refused command returns the state unchanged.
pub fn apply(
    mut state: EditorState,
    command: EditCommand,
    ids: &dyn IdSource,
) -> (EditorState, Outcome) {
    let outcome = apply_in_place(&mut state, command, ids);
    (state, outcome)
}

fn apply_in_place(state: &mut EditorState, command: EditCommand, ids: &dyn IdSource) -> Outcome {
    match command {
        EditCommand::InsertChar(ch) => edit_text(state, |b| b.insert_char(ch)),
        EditCommand::InsertText(text) => edit_text(state, |b| b.insert_str(&text)),
        EditCommand::Newline => edit_text(state, TextBuffer::split_line),
        EditCommand::DeleteBack => edit_text(state, |b| {
            b.delete_back();
        }),
        EditCommand::DeleteForward => edit_text(state, |b| {
            b.delete_forward();
        }),
        EditCommand::MoveCursor(direction) => {
            state.buffer.move_cursor(direction);
            Ok(Notice::Quiet)
        }
        EditCommand::MoveHome => {
            state.buffer.move_home();
            Ok(Notice::Quiet)
        }
        EditCommand::MoveEnd => {
            state.buffer.move_end();
            Ok(Notice::Quiet)
        }
        EditCommand::ReplaceText(text) => {
            state.write_text(&text);
            Ok(Notice::Quiet)
        }
        EditCommand::SetField(field, value) => {
            *state.form.field_mut(field) = value;
            Ok(Notice::Quiet)
        }
        EditCommand::LoadIntoForm(position) => {
            let tasks = state.parsed().into_records()?;
            let record = tasks.get(position).ok_or(EditError::NoSuchEntry(position))?;
            state.form = FormState::load(record);
            Ok(Notice::Editing(record.id.clone()))
        }
        EditCommand::Submit => submit(state, ids),
        EditCommand::CancelEdit => {
            state.clear_form();
            Ok(Notice::EditCancelled)
        }
        EditCommand::Remove(id) => {
            let (text, removed) = ops::remove(&state.text(), &id)?;
            state.write_text(&text);
            tracing::debug!(id = id.as_str(), removed, "removed tasks");
            Ok(Notice::Removed(id, removed))
        }
        EditCommand::BulkImport(lines) => {
            let (text, added) = ops::bulk_import(&state.text(), &lines, ids)?;
            state.write_text(&text);
            tracing::debug!(added, "bulk import");
            Ok(Notice::BulkAdded(added))
        }
    }
}

fn edit_text(state: &mut EditorState, edit: impl FnOnce(&mut TextBuffer)) -> Outcome {
    let before = state.buffer.revision();
    edit(&mut state.buffer);
    if state.buffer.revision() != before {
        state.refresh_live();
    }
    Ok(Notice::Quiet)
}

fn submit(state: &mut EditorState, ids: &dyn IdSource) -> Outcome {
    let record = state.form.build_record(ids);
    let id = record.id.clone();
    let notice = match state.form.mode.clone() {
        EditMode::Add => {
            let text = ops::append(&state.text(), record)?;
            state.write_text(&text);
            Notice::Added(id)
        }
        EditMode::Edit(target) => {
            let (text, outcome) = ops::save_edit(&state.text(), &target, record)?;
            state.write_text(&text);
            match outcome {
                SaveOutcome::Replaced(_) => Notice::Saved(id),
                SaveOutcome::Appended => {
                    tracing::debug!(edit_target = target.as_str(), "edit target missing, appended");
                    Notice::SavedAsNew(id)
                }
            }
        }
    };
    state.clear_form();
    Ok(notice)
}
