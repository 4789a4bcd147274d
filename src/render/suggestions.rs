use crate::analysis::SuggestResponse;

use super::results::{Tier, percent};

pub const NO_SUGGESTIONS: &str = "No suggestions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEntry {
    pub title: String,
    pub reason: String,
    pub percent: i64,
    pub tier: Tier,
}

impl SuggestionEntry {
    pub fn score_label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Ranked suggestions, in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    pub strategy: Option<String>,
    pub entries: Vec<SuggestionEntry>,
}

impl SuggestionView {
    pub fn from_response(response: &SuggestResponse) -> Self {
        Self {
            strategy: response.strategy.clone(),
            entries: response
                .suggestions
                .iter()
                .map(|s| SuggestionEntry {
                    title: s.title.clone(),
                    reason: s.reason.clone(),
                    percent: percent(s.score),
                    tier: Tier::from_score(s.score),
                })
                .collect(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.entries.is_empty().then_some(NO_SUGGESTIONS)
    }
}
