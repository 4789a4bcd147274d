//! Client side of the prioritization service.
//!
//! - [`wire`]: request and response bodies
//! - [`client`]: blocking HTTP client and error mapping
//! - [`dispatch`]: worker threads and reply correlation

pub mod client;
pub mod dispatch;
pub mod wire;

pub use client::{
    AnalysisClient, AnalysisError, AnalysisResponse, DEFAULT_API_BASE, Endpoint, MAX_ERROR_CHARS,
};
pub use dispatch::{Completion, InFlight, Job, RequestId};
pub use wire::{
    AnalysisRequest, AnalyzeResponse, DEFAULT_STRATEGY, ScoredTask, SuggestResponse, Suggestion,
};
