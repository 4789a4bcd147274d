use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default effort estimate for new and malformed records, in hours.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;
/// Default importance on the conventional 1..=10 scale.
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// One task as stored in the task buffer and sent to the service.
///
/// Missing fields take their defaults when parsed, and so do known fields
/// holding a value of the wrong type. Keys this type does not know about are
/// kept in `extra` and written back after the known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_due_date")]
    pub due_date: Option<String>,
    #[serde(default = "default_hours", deserialize_with = "lenient_hours")]
    pub estimated_hours: f64,
    #[serde(default = "default_importance", deserialize_with = "lenient_importance")]
    pub importance: i64,
    #[serde(default, deserialize_with = "lenient_dependencies")]
    pub dependencies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_hours() -> f64 {
    DEFAULT_ESTIMATED_HOURS
}

const fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

/// The longest leading decimal number in `raw`, ignoring leading
/// whitespace. `"2.5h"` reads as `"2.5"`; without `fraction` only the
/// integer part is taken.
fn leading_number(raw: &str, fraction: bool) -> Option<&str> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if fraction {
        if bytes.get(end) == Some(&b'.') {
            let mut frac_end = end + 1;
            while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
                frac_end += 1;
            }
            if has_digits || frac_end > end + 1 {
                has_digits = true;
                end = frac_end;
            }
        }
        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = exp_end;
            while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                exp_end += 1;
            }
            if exp_end > exp_digits {
                end = exp_end;
            }
        }
    }
    has_digits.then(|| &s[..end])
}

/// Hours typed by a person: a leading number, or the default when there is
/// none or it is not finite.
pub fn parse_hours(raw: &str) -> f64 {
    leading_number(raw, true)
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|hours| hours.is_finite())
        .unwrap_or(DEFAULT_ESTIMATED_HOURS)
}

/// Importance typed by a person: the leading integer, or the default.
pub fn parse_importance(raw: &str) -> i64 {
    leading_number(raw, false)
        .and_then(|number| number.parse::<i64>().ok())
        .unwrap_or(DEFAULT_IMPORTANCE)
}

fn hours_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|hours| hours.is_finite())
            .unwrap_or(DEFAULT_ESTIMATED_HOURS),
        Value::String(s) => parse_hours(s),
        _ => DEFAULT_ESTIMATED_HOURS,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn importance_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| {
            // 7.5 reads as 7
            n.as_f64()
                .filter(|v| v.is_finite() && v.abs() < 9.0e15)
                .map_or(DEFAULT_IMPORTANCE, |v| v.trunc() as i64)
        }),
        Value::String(s) => parse_importance(s),
        _ => DEFAULT_IMPORTANCE,
    }
}

fn text_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Value::deserialize(de).map(text_from_value)
}

fn lenient_due_date<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_hours<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Value::deserialize(de).map(|value| hours_from_value(&value))
}

fn lenient_importance<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    Value::deserialize(de).map(|value| importance_from_value(&value))
}

fn lenient_dependencies<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| item.is_string() || item.is_number())
            .map(text_from_value)
            .collect(),
        _ => Vec::new(),
    })
}

impl TaskRecord {
    /// A record with the given id and title and every other field defaulted.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_due_date(mut self, due: impl Into<String>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    #[must_use]
    pub const fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// The tasks loaded at startup when no file is given.
pub fn sample_tasks() -> Vec<TaskRecord> {
    vec![
        TaskRecord::new("t1", "Fix login bug")
            .with_due_date("2025-12-01")
            .with_estimated_hours(3.0)
            .with_importance(8),
        TaskRecord::new("t2", "Prepare release notes")
            .with_due_date("2025-11-30")
            .with_estimated_hours(1.0)
            .with_importance(6)
            .with_dependencies(["t1"]),
        TaskRecord::new("t3", "Refactor auth module")
            .with_estimated_hours(8.0)
            .with_importance(7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: TaskRecord = serde_json::from_str(r#"{"id":"a","title":"A"}"#).unwrap();
        assert_eq!(record.due_date, None);
        assert!((record.estimated_hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.importance, 5);
        assert!(record.dependencies.is_empty());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_null_due_date_is_none() {
        let record: TaskRecord =
            serde_json::from_str(r#"{"id":"a","title":"A","due_date":null}"#).unwrap();
        assert_eq!(record.due_date, None);
    }

    #[test]
    fn test_unknown_keys_survive_serialization_in_order() {
        let record: TaskRecord =
            serde_json::from_str(r#"{"id":"a","title":"A","zeta":1,"alpha":"x"}"#).unwrap();
        let keys: Vec<_> = record.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""zeta":1"#));
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_mistyped_fields_fall_back_to_defaults() {
        let record: TaskRecord = serde_json::from_str(
            r#"{"id":7,"title":null,"due_date":20251201,"estimated_hours":null,"importance":"high","dependencies":"t1"}"#,
        )
        .unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.title, "");
        assert_eq!(record.due_date, None);
        assert!((record.estimated_hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.importance, 5);
        assert!(record.dependencies.is_empty());
    }

    #[test]
    fn test_numeric_strings_and_fractions_are_coerced() {
        let record: TaskRecord = serde_json::from_str(
            r#"{"id":"a","estimated_hours":"2.5","importance":7.9,"dependencies":["t1",2,null]}"#,
        )
        .unwrap();
        assert!((record.estimated_hours - 2.5).abs() < f64::EPSILON);
        assert_eq!(record.importance, 7);
        assert_eq!(record.dependencies, vec!["t1".to_string(), "2".to_string()]);

        let record: TaskRecord = serde_json::from_str(r#"{"importance":"8"}"#).unwrap();
        assert_eq!(record.importance, 8);
    }

    #[test]
    fn test_typed_numbers_read_their_leading_value() {
        assert!((parse_hours("2.5h") - 2.5).abs() < f64::EPSILON);
        assert!((parse_hours(" .5") - 0.5).abs() < f64::EPSILON);
        assert!((parse_hours("3e1x") - 30.0).abs() < f64::EPSILON);
        assert!((parse_hours("1e999") - 1.0).abs() < f64::EPSILON);
        assert!((parse_hours("abc") - 1.0).abs() < f64::EPSILON);
        assert!((parse_hours("-") - 1.0).abs() < f64::EPSILON);
        assert_eq!(parse_importance("7abc"), 7);
        assert_eq!(parse_importance("7.9"), 7);
        assert_eq!(parse_importance("-3"), -3);
        assert_eq!(parse_importance("NaN"), 5);
        assert_eq!(parse_importance(""), 5);
    }

    #[test]
    fn test_null_due_date_is_written_explicitly() {
        let json = serde_json::to_string(&TaskRecord::new("a", "A")).unwrap();
        assert!(json.contains(r#""due_date":null"#));
    }

    #[test]
    fn test_sample_has_dependency_on_first_task() {
        let sample = sample_tasks();
        assert_eq!(sample.len(), 3);
        assert_eq!(sample[1].dependencies, vec!["t1".to_string()]);
        assert_eq!(sample[2].due_date, None);
    }
}
