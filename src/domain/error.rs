//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Failures while building a review corpus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("dataset not found: {location} ({reason})")]
    NotFound { location: String, reason: String },

    #[error("dataset has no \"text\" column (headers: {headers})")]
    MissingColumn { headers: String },

    #[error("dataset contains no non-empty reviews")]
    Empty,
}

/// Failures while classifying a single review.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("authentication failed (HTTP {status}): check the API token")]
    AuthFailed { status: u16 },

    #[error("rate limited by classifier service; try again later or supply a token")]
    RateLimited,

    #[error("classifier service error (HTTP {status}): {detail}")]
    ServiceError { status: u16, detail: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("network failure: {0}")]
    NetworkFailure(String),
}
