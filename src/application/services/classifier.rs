//! Classification service
//!
//! Sends one review to the classifier endpoint and normalizes the reply.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::{error_detail, parse_prediction, AnalysisError, ClassificationResult};
use crate::infrastructure::traits::{ClassifierTransport, HttpReply};

/// Service for classifying review text.
pub struct ClassifierService {
    transport: Arc<dyn ClassifierTransport>,
}

impl ClassifierService {
    pub fn new(transport: Arc<dyn ClassifierTransport>) -> Self {
        Self { transport }
    }

    /// Classify `text`, optionally authenticating with a bearer token.
    ///
    /// One request per call: no retry, no backoff.
    #[instrument(skip(self, text, token), fields(chars = text.chars().count(), authenticated = token.is_some()))]
    pub fn analyze(
        &self,
        text: &str,
        token: Option<&str>,
    ) -> Result<ClassificationResult, AnalysisError> {
        let token = effective_token(token);
        debug!("requesting");
        let reply = self.transport.post(text, token).map_err(|e| {
            warn!("request failed: {}", e);
            AnalysisError::NetworkFailure(e.to_string())
        })?;

        match interpret_reply(&reply) {
            Ok(result) => {
                info!("succeeded: {} {:.3} -> {}", result.label, result.score, result.bucket);
                Ok(result)
            }
            Err(e) => {
                warn!("failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Treat blank tokens as absent.
pub fn effective_token(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

/// Map an HTTP reply to a result or an analysis error.
pub fn interpret_reply(reply: &HttpReply) -> Result<ClassificationResult, AnalysisError> {
    match reply.status {
        401 | 403 => Err(AnalysisError::AuthFailed {
            status: reply.status,
        }),
        429 => Err(AnalysisError::RateLimited),
        _ if !reply.is_success() => Err(AnalysisError::ServiceError {
            status: reply.status,
            detail: error_detail(&reply.body),
        }),
        _ => parse_prediction(&reply.body),
    }
}
