use crate::analysis::wire::next_strategy;
use crate::analysis::{AnalysisRequest, AnalysisResponse, Completion, Endpoint, Job};
use crate::app::Model;
use crate::app::model::{Focus, Panel, ToastLevel, sample_text};
use crate::editor::{Direction, TextBuffer};
use crate::render::{ResultView, SuggestionView};
use crate::tasks::{EditCommand, EditError, Notice, ParsedBuffer, apply};

/// All possible events and actions in the application.
///
/// These represent user input, worker replies, and internal actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Focus
    /// Move focus to the next pane
    FocusNext,
    /// Move focus to the previous pane
    FocusPrev,

    // Editing
    /// Run an editing command against the task buffer
    Edit(EditCommand),
    /// Type a character into the selected form field
    FormInput(char),
    /// Delete the last character of the selected form field
    FormBackspace,
    /// Select the previous form field
    FormUp,
    /// Select the next form field
    FormDown,
    /// Submit the form (add or save)
    FormSubmit,
    /// Leave edit mode and clear the form
    FormCancel,
    /// Move the live list selection up
    LiveUp,
    /// Move the live list selection down
    LiveDown,
    /// Load the selected live entry into the form
    LiveEdit,
    /// Remove every record with the selected entry's id
    LiveRemove,
    /// Replace the buffer with the sample tasks
    LoadSample,

    // Bulk import overlay
    /// Open the bulk import overlay
    OpenBulk,
    /// Edit the bulk import text
    BulkInsertChar(char),
    BulkNewline,
    BulkDeleteBack,
    BulkMoveCursor(Direction),
    /// Import the overlay lines as new tasks
    BulkSubmit,
    /// Close the overlay without importing
    BulkCancel,

    // Analysis
    /// Send the buffer to the analyze endpoint
    Analyze,
    /// Send the buffer to the suggest endpoint
    Suggest,
    /// Switch to the next known strategy
    CycleStrategy,
    /// Hide results and suggestions
    ClearResults,
    /// A worker finished a request
    Completed(Completion),
    /// Scroll the results pane up by n lines
    ResultsScrollUp(usize),
    /// Scroll the results pane down by n lines
    ResultsScrollDown(usize),

    // Window
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Requests
/// are only queued on the model; the event loop hands them to workers.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::FocusNext => model.focus = model.focus.next(),
        Message::FocusPrev => model.focus = model.focus.prev(),

        Message::Edit(command) => {
            run_edit(&mut model, command);
        }
        Message::FormInput(ch) => {
            let field = model.form_field;
            let mut value = model.editor.form().field(field).to_string();
            value.push(ch);
            run_edit(&mut model, EditCommand::SetField(field, value));
        }
        Message::FormBackspace => {
            let field = model.form_field;
            let mut value = model.editor.form().field(field).to_string();
            if value.pop().is_some() {
                run_edit(&mut model, EditCommand::SetField(field, value));
            }
        }
        Message::FormUp => model.form_field = model.form_field.prev(),
        Message::FormDown => model.form_field = model.form_field.next(),
        Message::FormSubmit => {
            run_edit(&mut model, EditCommand::Submit);
        }
        Message::FormCancel => {
            run_edit(&mut model, EditCommand::CancelEdit);
        }
        Message::LiveUp => {
            model.live_selected = model.live_selected.saturating_sub(1);
        }
        Message::LiveDown => {
            model.live_selected += 1;
            model.clamp_live_selection();
        }
        Message::LiveEdit => {
            if let Some(entry) = model.editor.live().entries().get(model.live_selected) {
                let command = entry.edit_command();
                if run_edit(&mut model, command) {
                    model.focus = Focus::Form;
                    model.form_field = crate::tasks::FormField::Title;
                }
            }
        }
        Message::LiveRemove => {
            if let Some(entry) = model.editor.live().entries().get(model.live_selected) {
                let command = entry.remove_command();
                run_edit(&mut model, command);
            }
        }
        Message::LoadSample => {
            if run_edit(&mut model, EditCommand::ReplaceText(sample_text())) {
                model.suggestions = Panel::Hidden;
                model.buffer_scroll = 0;
                model.show_toast(ToastLevel::Info, "Sample loaded");
            }
        }

        Message::OpenBulk => {
            if model.bulk_input.is_none() {
                model.bulk_input = Some(TextBuffer::default());
            }
        }
        Message::BulkInsertChar(ch) => edit_bulk(&mut model, |b| b.insert_char(ch)),
        Message::BulkNewline => edit_bulk(&mut model, TextBuffer::split_line),
        Message::BulkDeleteBack => edit_bulk(&mut model, |b| {
            b.delete_back();
        }),
        Message::BulkMoveCursor(direction) => edit_bulk(&mut model, |b| b.move_cursor(direction)),
        Message::BulkSubmit => {
            if let Some(lines) = model.bulk_input.as_ref().map(TextBuffer::text) {
                // Refused imports keep the overlay open so the lines are not lost.
                if run_edit(&mut model, EditCommand::BulkImport(lines)) {
                    model.bulk_input = None;
                }
            }
        }
        Message::BulkCancel => model.bulk_input = None,

        Message::Analyze => request(&mut model, Endpoint::Analyze),
        Message::Suggest => request(&mut model, Endpoint::Suggest),
        Message::CycleStrategy => {
            model.strategy = next_strategy(&model.strategy).to_string();
            let text = format!("Strategy: {}", model.strategy);
            model.show_toast(ToastLevel::Info, text);
        }
        Message::ClearResults => {
            model.results = Panel::Hidden;
            model.suggestions = Panel::Hidden;
            model.results_scroll = 0;
            model.show_toast(ToastLevel::Info, "Cleared");
        }
        Message::Completed(completion) => complete(&mut model, completion),
        Message::ResultsScrollUp(n) => {
            model.results_scroll = model.results_scroll.saturating_sub(n);
        }
        Message::ResultsScrollDown(n) => {
            model.results_scroll = model.results_scroll.saturating_add(n);
        }

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Redraw => {}
        Message::Quit => model.should_quit = true,
    }
    model
}

/// Apply an editing command and report its outcome. Returns whether the
/// command was accepted.
fn run_edit(model: &mut Model, command: EditCommand) -> bool {
    let editor = std::mem::take(&mut model.editor);
    let (editor, outcome) = apply(editor, command, model.ids());
    model.editor = editor;
    model.clamp_live_selection();
    match outcome {
        Ok(Notice::Quiet) => true,
        Ok(Notice::Removed(id, 0)) => {
            model.show_toast(ToastLevel::Warning, format!("No task with id {id}"));
            true
        }
        Ok(notice) => {
            model.show_toast(ToastLevel::Info, notice.to_string());
            true
        }
        Err(err @ EditError::InvalidBuffer(_)) => {
            model.show_toast(ToastLevel::Warning, err.to_string());
            false
        }
        Err(err) => {
            model.show_toast(ToastLevel::Error, err.to_string());
            false
        }
    }
}

fn edit_bulk(model: &mut Model, edit: impl FnOnce(&mut TextBuffer)) {
    if let Some(buffer) = model.bulk_input.as_mut() {
        edit(buffer);
    }
}

/// Validate the buffer and queue a request for `endpoint`.
fn request(model: &mut Model, endpoint: Endpoint) {
    let tasks = match model.editor.parsed() {
        ParsedBuffer::Empty => {
            model.show_toast(ToastLevel::Warning, "No tasks provided");
            return;
        }
        ParsedBuffer::Invalid(err) => {
            model.show_toast(ToastLevel::Error, format!("Invalid JSON: {err}"));
            return;
        }
        ParsedBuffer::Tasks(tasks) => tasks,
    };
    let id = model.in_flight.begin(endpoint);
    let request = AnalysisRequest::new(tasks, &model.strategy);
    tracing::debug!(request = %id, %endpoint, tasks = request.tasks.len(), "request queued");
    model.outbox.push(Job {
        id,
        endpoint,
        request,
    });
    match endpoint {
        Endpoint::Analyze => {
            model.results = Panel::Pending;
            model.suggestions = Panel::Hidden;
            model.show_toast(ToastLevel::Info, "Analyzing…");
        }
        Endpoint::Suggest => {
            model.suggestions = Panel::Pending;
            model.show_toast(ToastLevel::Info, "Fetching suggestions…");
        }
    }
}

/// Apply a worker reply if it answers the newest request for its endpoint.
fn complete(model: &mut Model, completion: Completion) {
    let Completion {
        id,
        endpoint,
        outcome,
    } = completion;
    if !model.in_flight.settle(endpoint, id) {
        tracing::debug!(request = %id, %endpoint, "discarding superseded reply");
        return;
    }
    match outcome {
        Ok(AnalysisResponse::Analysis(response)) => {
            let view = ResultView::from_response(&response);
            model.show_toast(ToastLevel::Info, view.header.clone());
            model.results = Panel::Ready(view);
            model.results_scroll = 0;
        }
        Ok(AnalysisResponse::Suggestions(response)) => {
            model.suggestions = Panel::Ready(SuggestionView::from_response(&response));
            model.show_toast(ToastLevel::Info, "Suggestions received");
        }
        Err(err) => {
            let message = err.to_string();
            model.show_toast(ToastLevel::Error, format!("Server error: {message}"));
            match endpoint {
                Endpoint::Analyze => model.results = Panel::Failed(message),
                Endpoint::Suggest => model.suggestions = Panel::Failed(message),
            }
        }
    }
}
