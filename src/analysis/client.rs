use std::fmt;

use super::wire::{AnalysisRequest, AnalyzeResponse, SuggestResponse};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/tasks";

/// Longest error text surfaced to the user, in characters.
pub const MAX_ERROR_CHARS: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Analyze,
    Suggest,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Analyze => "analyze/",
            Self::Suggest => "suggest/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Analyze => "analyze",
            Self::Suggest => "suggest",
        })
    }
}

/// A decoded success body, by endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResponse {
    Analysis(AnalyzeResponse),
    Suggestions(SuggestResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Transport(String),
    #[error("{status}: {body}")]
    Service { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Cut `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Turn a status and body into a response or a bounded error.
///
/// # Errors
/// Non-2xx statuses become [`AnalysisError::Service`]; bodies that do not
/// match the endpoint's shape become [`AnalysisError::Decode`].
pub fn interpret_response(
    endpoint: Endpoint,
    status: u16,
    body: &str,
) -> Result<AnalysisResponse, AnalysisError> {
    if !(200..300).contains(&status) {
        return Err(AnalysisError::Service {
            status,
            body: truncate_chars(body, MAX_ERROR_CHARS),
        });
    }
    let decoded = match endpoint {
        Endpoint::Analyze => serde_json::from_str(body).map(AnalysisResponse::Analysis),
        Endpoint::Suggest => serde_json::from_str(body).map(AnalysisResponse::Suggestions),
    };
    decoded.map_err(|err| AnalysisError::Decode(truncate_chars(&err.to_string(), MAX_ERROR_CHARS)))
}

/// Blocking JSON client for the prioritization service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AnalysisClient {
    /// # Errors
    /// Fails if the HTTP client cannot be constructed (TLS backend setup).
    pub fn new(base_url: &str) -> Result<Self, AnalysisError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| AnalysisError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// POST `request` to `endpoint` and decode the reply.
    ///
    /// # Errors
    /// See [`AnalysisError`]; every message is bounded to
    /// [`MAX_ERROR_CHARS`] characters.
    pub fn send(
        &self,
        endpoint: Endpoint,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let url = self.endpoint_url(endpoint);
        let transport =
            |err: reqwest::Error| AnalysisError::Transport(truncate_chars(&err.to_string(), MAX_ERROR_CHARS));
        let response = self.http.post(&url).json(request).send().map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport)?;
        tracing::debug!(%endpoint, status, bytes = body.len(), "service replied");
        interpret_response(endpoint, status, &body)
    }
}
