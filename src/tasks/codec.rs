//! Reading and writing the task buffer text.
//!
//! The buffer is accepted either as a bare JSON array of records or as an
//! object carrying that array under `tasks`. It is always written back as a
//! pretty-printed bare array.

use serde_json::Value;

use super::record::TaskRecord;

/// Why the buffer text could not be read as a task list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(String),
    #[error("JSON must be an array or {{ tasks: [...] }}")]
    Shape,
    /// An array item that is not a record object.
    #[error("task {index}: {reason}")]
    Record { index: usize, reason: String },
}

/// Outcome of reading the buffer.
///
/// `Empty` is a blank buffer. An explicit `[]` is `Tasks` with no records.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBuffer {
    Invalid(ParseError),
    Empty,
    Tasks(Vec<TaskRecord>),
}

impl ParsedBuffer {
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The records for a structural edit, treating a blank buffer as empty.
    ///
    /// # Errors
    /// Returns the parse error when the buffer is invalid.
    pub fn into_records(self) -> Result<Vec<TaskRecord>, ParseError> {
        match self {
            Self::Invalid(err) => Err(err),
            Self::Empty => Ok(Vec::new()),
            Self::Tasks(tasks) => Ok(tasks),
        }
    }
}

/// Parse the buffer text.
pub fn read_tasks(text: &str) -> ParsedBuffer {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedBuffer::Empty;
    }
    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => return ParsedBuffer::Invalid(ParseError::Syntax(err.to_string())),
    };
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return ParsedBuffer::Invalid(ParseError::Shape),
        },
        _ => return ParsedBuffer::Invalid(ParseError::Shape),
    };

    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return ParsedBuffer::Invalid(ParseError::Record {
                index,
                reason: "expected an object".to_string(),
            });
        }
        match serde_json::from_value::<TaskRecord>(item) {
            Ok(task) => tasks.push(task),
            Err(err) => {
                return ParsedBuffer::Invalid(ParseError::Record {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }
    ParsedBuffer::Tasks(tasks)
}

/// Serialize records as the canonical pretty-printed bare array.
///
/// # Errors
/// Fails only if a record holds a value JSON cannot represent.
pub fn encode_tasks(tasks: &[TaskRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::record::sample_tasks;

    #[test]
    fn test_blank_text_is_empty_not_invalid() {
        assert_eq!(read_tasks(""), ParsedBuffer::Empty);
        assert_eq!(read_tasks("  \n\t "), ParsedBuffer::Empty);
    }

    #[test]
    fn test_empty_array_is_tasks() {
        assert_eq!(read_tasks("[]"), ParsedBuffer::Tasks(Vec::new()));
    }

    #[test]
    fn test_bare_array_and_wrapped_object_read_the_same() {
        let bare = r#"[{"id":"t1","title":"A"}]"#;
        let wrapped = r#"{"strategy":"smart","tasks":[{"id":"t1","title":"A"}]}"#;
        assert_eq!(read_tasks(bare), read_tasks(wrapped));
        assert!(matches!(read_tasks(bare), ParsedBuffer::Tasks(ref t) if t.len() == 1));
    }

    #[test]
    fn test_syntax_error_is_invalid() {
        assert!(matches!(
            read_tasks("{not json"),
            ParsedBuffer::Invalid(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn test_wrong_shapes_are_invalid() {
        for text in ["42", r#""tasks""#, r#"{"tasks": 3}"#, r#"{"items": []}"#, "null"] {
            assert_eq!(
                read_tasks(text),
                ParsedBuffer::Invalid(ParseError::Shape),
                "{text}"
            );
        }
    }

    #[test]
    fn test_non_object_item_reports_its_index() {
        let parsed = read_tasks(r#"[{"id":"a"}, 7]"#);
        assert!(matches!(
            parsed,
            ParsedBuffer::Invalid(ParseError::Record { index: 1, .. })
        ));
    }

    #[test]
    fn test_mistyped_numeric_fields_do_not_invalidate_buffer() {
        for text in [
            r#"[{"id":"a","title":"A","importance":7.5}]"#,
            r#"[{"id":"a","title":"A","estimated_hours":null}]"#,
            r#"[{"id":"a","title":"A","importance":"8"}]"#,
            r#"{"tasks":[{"id":"a","title":"A","importance":"high","estimated_hours":"soon"}]}"#,
        ] {
            let ParsedBuffer::Tasks(tasks) = read_tasks(text) else {
                panic!("expected tasks for {text}");
            };
            assert_eq!(tasks.len(), 1, "{text}");
            assert_eq!(tasks[0].id, "a");
        }
    }

    #[test]
    fn test_mistyped_numbers_are_coerced_on_read() {
        let ParsedBuffer::Tasks(tasks) = read_tasks(
            r#"[{"id":"a","importance":7.5,"estimated_hours":null},{"id":"b","importance":"high","estimated_hours":"2.5"}]"#,
        ) else {
            panic!("expected tasks");
        };
        assert_eq!(tasks[0].importance, 7);
        assert!((tasks[0].estimated_hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(tasks[1].importance, 5);
        assert!((tasks[1].estimated_hours - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_encode_is_pretty_bare_array() {
        let text = encode_tasks(&sample_tasks()[..1]).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"t1\""));
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_encode_of_nothing_is_empty_array() {
        assert_eq!(encode_tasks(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_into_records_treats_blank_as_empty() {
        assert_eq!(ParsedBuffer::Empty.into_records().unwrap(), Vec::new());
        assert!(read_tasks("[").into_records().is_err());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn record_strategy() -> impl Strategy<Value = TaskRecord> {
            (
                "[a-z0-9]{0,8}",
                ".{0,20}",
                proptest::option::of("[0-9]{4}-[0-9]{2}-[0-9]{2}"),
                0.0..1000.0f64,
                -20..20i64,
                proptest::collection::vec("[a-z0-9]{1,4}", 0..4),
            )
                .prop_map(|(id, title, due, hours, importance, deps)| {
                    let mut record = TaskRecord::new(id, title)
                        .with_estimated_hours(hours)
                        .with_importance(importance)
                        .with_dependencies(deps);
                    record.due_date = due;
                    record
                })
        }

        proptest! {
            #[test]
            fn write_then_read_returns_same_records(
                tasks in proptest::collection::vec(record_strategy(), 0..8),
            ) {
                let text = encode_tasks(&tasks).unwrap();
                prop_assert_eq!(read_tasks(&text), ParsedBuffer::Tasks(tasks));
            }
        }
    }
}
