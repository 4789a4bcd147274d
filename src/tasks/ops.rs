//! Structural edits of the task buffer.
//!
//! Each operation parses the whole buffer, changes the record list and
//! serializes it again. Formatting of the input text is not preserved. An
//! invalid buffer is never modified.

use super::codec::{ParseError, encode_tasks, read_tasks};
use super::ids::{IdSource, bulk_id};
use super::record::TaskRecord;

/// Why a structural edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Tasks JSON invalid, fix it first ({0})")]
    InvalidBuffer(#[from] ParseError),
    #[error("could not write tasks: {0}")]
    Encode(String),
    #[error("no task at position {0}")]
    NoSuchEntry(usize),
}

impl From<serde_json::Error> for EditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Where an edit-save landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Replaced(usize),
    Appended,
}

fn records(text: &str) -> Result<Vec<TaskRecord>, EditError> {
    Ok(read_tasks(text).into_records()?)
}

/// Append `record` at the end of the buffer.
///
/// # Errors
/// Refuses when the buffer does not parse.
pub fn append(text: &str, record: TaskRecord) -> Result<String, EditError> {
    let mut tasks = records(text)?;
    tasks.push(record);
    Ok(encode_tasks(&tasks)?)
}

/// Replace the first record whose id is `target` with `record`, keeping its
/// position. When no such record exists any more the record is appended.
///
/// # Errors
/// Refuses when the buffer does not parse.
pub fn save_edit(
    text: &str,
    target: &str,
    record: TaskRecord,
) -> Result<(String, SaveOutcome), EditError> {
    let mut tasks = records(text)?;
    let outcome = if let Some(position) = tasks.iter().position(|t| t.id == target) {
        tasks[position] = record;
        SaveOutcome::Replaced(position)
    } else {
        tasks.push(record);
        SaveOutcome::Appended
    };
    Ok((encode_tasks(&tasks)?, outcome))
}

/// Remove every record whose id equals `id`. Returns the new text and the
/// number of records removed.
///
/// # Errors
/// Refuses when the buffer does not parse.
pub fn remove(text: &str, id: &str) -> Result<(String, usize), EditError> {
    let mut tasks = records(text)?;
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    let removed = before - tasks.len();
    Ok((encode_tasks(&tasks)?, removed))
}

/// Append one default record per non-blank line of `lines`, titled with the
/// trimmed line. Returns the new text and the number of records added.
///
/// # Errors
/// Refuses as a whole when the buffer does not parse.
pub fn bulk_import(
    text: &str,
    lines: &str,
    ids: &dyn IdSource,
) -> Result<(String, usize), EditError> {
    let mut tasks = records(text)?;
    let before = tasks.len();
    tasks.extend(
        lines
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| TaskRecord::new(bulk_id(ids), line)),
    );
    let added = tasks.len() - before;
    Ok((encode_tasks(&tasks)?, added))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::codec::ParsedBuffer;
    use crate::tasks::ids::fixed::FixedIds;

    fn parse(text: &str) -> Vec<TaskRecord> {
        read_tasks(text).into_records().unwrap()
    }

    fn buffer(records: &[TaskRecord]) -> String {
        encode_tasks(records).unwrap()
    }

    #[test]
    fn test_remove_works_on_record_with_fractional_importance() {
        let text = r#"[{"id":"a","title":"A","importance":7.5},{"id":"b","title":"B"}]"#;
        let (out, removed) = remove(text, "a").unwrap();
        assert_eq!(removed, 1);
        assert_eq!(parse(&out), vec![TaskRecord::new("b", "B")]);
    }

    #[test]
    fn test_remove_only_record_leaves_empty_array() {
        let text = r#"[{"id":"t1","title":"A","due_date":null,"estimated_hours":2,"importance":5,"dependencies":[]}]"#;
        let (out, removed) = remove(text, "t1").unwrap();
        assert_eq!(out, "[]");
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_remove_drops_every_duplicate() {
        let text = buffer(&[
            TaskRecord::new("a", "1"),
            TaskRecord::new("b", "2"),
            TaskRecord::new("a", "3"),
            TaskRecord::new("c", "4"),
            TaskRecord::new("a", "5"),
        ]);
        let (out, removed) = remove(&text, "a").unwrap();
        assert_eq!(removed, 3);
        let ids: Vec<_> = parse(&out).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_unknown_id_rewrites_without_loss() {
        let text = r#"{"tasks":[{"id":"a","title":"A"}]}"#;
        let (out, removed) = remove(text, "zzz").unwrap();
        assert_eq!(removed, 0);
        assert!(out.starts_with('['));
        assert_eq!(parse(&out).len(), 1);
    }

    #[test]
    fn test_remove_refuses_invalid_buffer() {
        let err = remove("{not json", "t1").unwrap_err();
        assert!(matches!(err, EditError::InvalidBuffer(ParseError::Syntax(_))));
    }

    #[test]
    fn test_remove_on_blank_buffer_writes_empty_array() {
        assert_eq!(remove("   ", "t1").unwrap(), ("[]".to_string(), 0));
    }

    #[test]
    fn test_save_edit_replaces_in_place() {
        let text = buffer(&[
            TaskRecord::new("a", "1"),
            TaskRecord::new("b", "2"),
            TaskRecord::new("c", "3"),
        ]);
        let edited = TaskRecord::new("b", "two").with_importance(9);
        let (out, outcome) = save_edit(&text, "b", edited.clone()).unwrap();
        assert_eq!(outcome, SaveOutcome::Replaced(1));
        let tasks = parse(&out);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "a");
        assert_eq!(tasks[1], edited);
        assert_eq!(tasks[2].id, "c");
    }

    #[test]
    fn test_save_edit_can_rename_the_target() {
        let text = buffer(&[TaskRecord::new("a", "1"), TaskRecord::new("b", "2")]);
        let (out, outcome) = save_edit(&text, "a", TaskRecord::new("z", "1")).unwrap();
        assert_eq!(outcome, SaveOutcome::Replaced(0));
        let ids: Vec<_> = parse(&out).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["z", "b"]);
    }

    #[test]
    fn test_save_edit_missing_target_appends() {
        let text = buffer(&[TaskRecord::new("a", "1")]);
        let (out, outcome) = save_edit(&text, "gone", TaskRecord::new("gone", "x")).unwrap();
        assert_eq!(outcome, SaveOutcome::Appended);
        let ids: Vec<_> = parse(&out).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "gone"]);
    }

    #[test]
    fn test_save_edit_refuses_invalid_buffer() {
        assert!(save_edit("[", "a", TaskRecord::new("a", "x")).is_err());
    }

    #[test]
    fn test_bulk_import_skips_blank_lines_and_keeps_order() {
        let text = buffer(&[TaskRecord::new("a", "existing")]);
        let lines = "\n  Fix bug A  \n\r\n   \nWrite docs\r\nShip\n";
        let (out, added) = bulk_import(&text, lines, &FixedIds::new(1_700_000_123_456)).unwrap();
        assert_eq!(added, 3);
        let tasks = parse(&out);
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["existing", "Fix bug A", "Write docs", "Ship"]);
        assert_eq!(tasks[1], TaskRecord::new("t1234560", "Fix bug A"));
        assert_eq!(tasks[3].id, "t1234562");
    }

    #[test]
    fn test_bulk_import_refuses_invalid_buffer_entirely() {
        let err = bulk_import(r#"{"tasks": 1}"#, "one\ntwo", &FixedIds::new(0)).unwrap_err();
        assert_eq!(err, EditError::InvalidBuffer(ParseError::Shape));
    }

    #[test]
    fn test_append_keeps_unknown_keys_of_existing_records() {
        let text = r#"[{"id":"a","title":"A","owner":"kim"}]"#;
        let out = append(text, TaskRecord::new("b", "B")).unwrap();
        assert!(out.contains("\"owner\": \"kim\""));
        assert!(matches!(read_tasks(&out), ParsedBuffer::Tasks(ref t) if t.len() == 2));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn remove_drops_exactly_the_matching_records(
                ids in proptest::collection::vec(prop_oneof!["x", "y", "z"], 0..20),
                target in prop_oneof!["x", "y", "q"],
            ) {
                let records: Vec<_> = ids
                    .iter()
                    .enumerate()
                    .map(|(i, id)| TaskRecord::new(id.clone(), i.to_string()))
                    .collect();
                let matching = ids.iter().filter(|id| **id == target).count();
                let (out, removed) = remove(&buffer(&records), &target).unwrap();
                let left = parse(&out);
                prop_assert_eq!(removed, matching);
                prop_assert_eq!(left.len(), records.len() - matching);
                prop_assert!(left.iter().all(|t| t.id != target));
            }

            #[test]
            fn bulk_import_adds_one_record_per_nonblank_line(
                lines in proptest::collection::vec(prop_oneof!["", "   ", "[a-z]{1,6}"], 0..15),
            ) {
                let expected: Vec<String> = lines
                    .iter()
                    .filter(|l| !l.trim().is_empty())
                    .cloned()
                    .collect();
                let (out, added) = bulk_import("[]", &lines.join("\n"), &FixedIds::new(0)).unwrap();
                let titles: Vec<String> = parse(&out).into_iter().map(|t| t.title).collect();
                prop_assert_eq!(added, expected.len());
                prop_assert_eq!(titles, expected);
            }
        }
    }
}
