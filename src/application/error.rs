//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{AnalysisError, LoadError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("no reviews loaded; load a dataset first")]
    NoReviewLoaded,

    #[error("no review selected yet; pick one first")]
    NoCurrentReview,

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
