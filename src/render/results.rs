use crate::analysis::{AnalyzeResponse, ScoredTask};

use super::{display_value, is_blank};

pub const NO_TASKS: &str = "No tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub const HIGH_FLOOR: f64 = 0.7;
    pub const MEDIUM_FLOOR: f64 = 0.4;

    /// Lower bounds are inclusive. A score that is not a number is low.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_FLOOR {
            Self::High
        } else if score >= Self::MEDIUM_FLOOR {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// `round(score * 100)`, halves rounded away from zero.
#[allow(clippy::cast_possible_truncation)]
pub fn percent(score: f64) -> i64 {
    if score.is_finite() {
        (score * 100.0).round() as i64
    } else {
        0
    }
}

/// One scored task, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub title: String,
    pub tier: Tier,
    pub percent: i64,
    pub details: String,
    /// Factor name and value, in the order the service sent them.
    pub components: Vec<(String, String)>,
    pub explanation: String,
}

impl TaskCard {
    pub fn from_scored(task: &ScoredTask) -> Self {
        let title = task
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| task.id.clone())
            .unwrap_or_default();
        Self {
            title,
            tier: Tier::from_score(task.score),
            percent: percent(task.score),
            details: details_line(task),
            components: task
                .components
                .iter()
                .map(|(name, value)| (name.clone(), display_value(value)))
                .collect(),
            explanation: task.explanation.clone(),
        }
    }

    pub fn components_line(&self) -> String {
        self.components
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn score_label(&self) -> String {
        format!("{}%", self.percent)
    }
}

fn details_line(task: &ScoredTask) -> String {
    let raw = &task.raw;
    let due = raw
        .due_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("none");
    let shown = |value: Option<&serde_json::Value>| {
        value
            .filter(|v| !is_blank(v))
            .map_or_else(|| "n/a".to_string(), display_value)
    };
    format!(
        "Due: {due} · Importance: {} · Est: {}",
        shown(raw.importance.as_ref()),
        shown(raw.estimated_hours.as_ref())
    )
}

/// Everything the results pane shows for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub header: String,
    /// Dependency cycles the service found, one line each.
    pub warnings: Vec<String>,
    /// Empty means the placeholder is shown instead.
    pub cards: Vec<TaskCard>,
}

impl ResultView {
    pub fn from_response(response: &AnalyzeResponse) -> Self {
        let warnings = response
            .cycles
            .iter()
            .filter(|cycle| !cycle.is_empty())
            .map(|cycle| format!("Dependency cycle: {}", cycle.join(" -> ")))
            .collect();
        Self {
            header: format!(
                "Strategy: {} · {} tasks",
                response.strategy,
                response.tasks.len()
            ),
            warnings,
            cards: response.tasks.iter().map(TaskCard::from_scored).collect(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(NO_TASKS)
    }
}
