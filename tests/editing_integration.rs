//! Drive the editing model end to end without a terminal.

use taskdeck::app::{Message, Model, Panel, update};
use taskdeck::prelude::{EditCommand, EditorState, ParsedBuffer, TaskRecord, apply};
use taskdeck::tasks::{EditMode, FormField, LiveList, Notice, SystemIds, encode_tasks, read_tasks};

fn records(state: &EditorState) -> Vec<TaskRecord> {
    state.parsed().into_records().unwrap()
}

#[test]
fn test_remove_example_leaves_empty_array() {
    let text = r#"[{"id":"t1","title":"A","due_date":null,"estimated_hours":2,"importance":5,"dependencies":[]}]"#;
    let (state, outcome) = apply(
        EditorState::new(text),
        EditCommand::Remove("t1".into()),
        &SystemIds,
    );
    assert_eq!(outcome, Ok(Notice::Removed("t1".into(), 1)));
    assert_eq!(state.text(), "[]");
    assert_eq!(read_tasks(&state.text()), ParsedBuffer::Tasks(Vec::new()));
}

#[test]
fn test_wrapped_buffer_is_rewritten_as_bare_array() {
    let text = r#"{"tasks": [{"id": "a", "title": "A"}, {"id": "b", "title": "B"}]}"#;
    let (state, _) = apply(
        EditorState::new(text),
        EditCommand::Remove("a".into()),
        &SystemIds,
    );
    assert!(state.text().trim_start().starts_with('['));
    assert_eq!(records(&state).len(), 1);
}

#[test]
fn test_invalid_buffer_refuses_every_structural_edit() {
    let text = "{not json";
    let state = EditorState::new(text);
    assert!(matches!(state.live(), LiveList::Warning(_)));
    assert_eq!(state.live().row_count(), 1);

    for command in [
        EditCommand::Remove("t1".into()),
        EditCommand::BulkImport("one\ntwo".into()),
        EditCommand::Submit,
    ] {
        let (next, outcome) = apply(state.clone(), command, &SystemIds);
        assert!(outcome.is_err());
        assert_eq!(next.text(), text);
    }
}

#[test]
fn test_add_with_blank_form_uses_defaults() {
    let state = EditorState::new("[]");
    let (state, _) = apply(
        state,
        EditCommand::SetField(FormField::EstimatedHours, "abc".into()),
        &SystemIds,
    );
    let (state, outcome) = apply(state, EditCommand::Submit, &SystemIds);
    assert!(matches!(outcome, Ok(Notice::Added(_))));

    let task = &records(&state)[0];
    assert!(!task.id.is_empty());
    assert_eq!(task.title, task.id);
    assert!((task.estimated_hours - 1.0).abs() < f64::EPSILON);
    assert_eq!(task.importance, 5);
    assert!(task.dependencies.is_empty());
}

#[test]
fn test_edit_round_trip_through_the_app() {
    let model = Model::with_sample();
    let model = update(model, Message::LiveEdit);
    assert_eq!(model.editor.mode(), &EditMode::Edit("t3".into()));

    let mut model = model;
    for _ in 0.."Refactor auth module".len() {
        model = update(model, Message::FormBackspace);
    }
    for ch in "Rewrite auth".chars() {
        model = update(model, Message::FormInput(ch));
    }
    let model = update(model, Message::FormSubmit);

    let tasks = model.editor.parsed().into_records().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[2].id, "t3");
    assert_eq!(tasks[2].title, "Rewrite auth");
    assert_eq!(model.editor.mode(), &EditMode::Add);
}

#[test]
fn test_analysis_is_not_queued_for_invalid_text() {
    let model = update(Model::new("[{]"), Message::Analyze);
    assert!(model.pending_requests().is_empty());
    assert!(model.results.is_hidden());

    let model = update(Model::with_sample(), Message::Analyze);
    assert_eq!(model.pending_requests().len(), 1);
    assert_eq!(model.results, Panel::Pending);
}

#[test]
fn test_encoded_sample_reads_back() {
    let tasks = taskdeck::tasks::sample_tasks();
    let text = encode_tasks(&tasks).unwrap();
    assert_eq!(read_tasks(&text), ParsedBuffer::Tasks(tasks));
}
