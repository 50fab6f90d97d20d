//! I/O boundary traits for testability
//!
//! These traits abstract the two network collaborators, allowing services
//! to be tested with mock implementations.

use std::io;

use serde::Serialize;

/// Raw reply from the classifier endpoint, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request payload understood by hosted text-classification endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest<'a> {
    pub inputs: &'a str,
}

/// Dataset source abstraction.
pub trait DatasetSource: Send + Sync {
    /// Fetch raw delimited text from `location`.
    ///
    /// Unsuccessful fetches (missing file, non-2xx status) return an error
    /// with kind `NotFound`; other failures keep their original kind.
    fn fetch(&self, location: &str) -> io::Result<String>;
}

/// Classifier endpoint abstraction.
pub trait ClassifierTransport: Send + Sync {
    /// Send one text to the classifier.
    ///
    /// Any HTTP status is returned as `Ok`; `Err` means the request never
    /// produced a response (connection, TLS, body read).
    fn post(&self, inputs: &str, token: Option<&str>) -> io::Result<HttpReply>;
}
