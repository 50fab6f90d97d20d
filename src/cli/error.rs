//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{AnalysisError, LoadError};
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => application_exit_code(app),
            },
        }
    }
}

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Load(LoadError::NotFound { .. }) => crate::exitcode::NOINPUT,
        ApplicationError::Load(_) => crate::exitcode::DATAERR,
        ApplicationError::Analysis(a) => match a {
            AnalysisError::AuthFailed { .. } => crate::exitcode::NOPERM,
            AnalysisError::UnexpectedShape(_) => crate::exitcode::DATAERR,
            AnalysisError::RateLimited
            | AnalysisError::ServiceError { .. }
            | AnalysisError::NetworkFailure(_) => crate::exitcode::UNAVAILABLE,
        },
        ApplicationError::NoReviewLoaded | ApplicationError::NoCurrentReview => {
            crate::exitcode::USAGE
        }
        ApplicationError::Config { .. } => crate::exitcode::CONFIG,
    }
}
