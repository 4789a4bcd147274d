//! Headless view models for service replies.
//!
//! These turn decoded responses into plain rows of text with a priority
//! tier attached. The terminal front end only decides colors and layout.

pub mod results;
pub mod suggestions;

pub use results::{NO_TASKS, ResultView, TaskCard, Tier, percent};
pub use suggestions::{NO_SUGGESTIONS, SuggestionEntry, SuggestionView};

use serde_json::Value;

/// Show a JSON scalar the way a person would write it: strings unquoted,
/// whole floats without a trailing `.0`.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Whether a value would read as missing (null, zero, false or empty).
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
