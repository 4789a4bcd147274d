use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tasks::TaskRecord;

pub const DEFAULT_STRATEGY: &str = "smart";

/// Strategy names the service understands. Any other name is sent as is.
pub const KNOWN_STRATEGIES: [&str; 5] = [
    "smart",
    "smart_balance",
    "fastest_wins",
    "high_impact",
    "deadline_driven",
];

/// The strategy after `current` in [`KNOWN_STRATEGIES`], wrapping around.
/// Unknown names restart at the first entry.
pub fn next_strategy(current: &str) -> &'static str {
    KNOWN_STRATEGIES
        .iter()
        .position(|s| *s == current)
        .map_or(KNOWN_STRATEGIES[0], |i| {
            KNOWN_STRATEGIES[(i + 1) % KNOWN_STRATEGIES.len()]
        })
}

/// Body sent to both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub tasks: Vec<TaskRecord>,
    pub strategy: String,
}

impl AnalysisRequest {
    /// A blank strategy falls back to [`DEFAULT_STRATEGY`].
    pub fn new(tasks: Vec<TaskRecord>, strategy: &str) -> Self {
        let strategy = match strategy.trim() {
            "" => DEFAULT_STRATEGY,
            s => s,
        };
        Self {
            tasks,
            strategy: strategy.to_string(),
        }
    }
}

/// The submitted fields echoed back with a scored task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub importance: Option<Value>,
    #[serde(default)]
    pub estimated_hours: Option<Value>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredTask {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub score: f64,
    /// Factor name to contribution, in the order the service sent them.
    #[serde(default)]
    pub components: Map<String, Value>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub raw: RawFields,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    pub strategy: String,
    #[serde(default)]
    pub tasks: Vec<ScoredTask>,
    /// Dependency cycles the service found, as id paths.
    #[serde(default)]
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub reason: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}
