use thiserror::Error;

/// Startup-time credential failure. Never raised per request.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("search API key must not be empty")]
    EmptyKey,
}

/// Failure to construct a session for an index.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("index name must not be empty")]
    EmptyIndexName,

    #[error("search endpoint '{0}' is not an http(s) URL")]
    InvalidEndpoint(String),

    #[error("failed to create search session for index '{index}': {message}")]
    Creation { index: String, message: String },
}

/// A failed backend call, with the public operation name attached.
///
/// Transport and backend-side failures are both collapsed into this type so
/// callers never handle HTTP-client error variants directly.
#[derive(Error, Debug)]
#[error("{operation} failed: {message}")]
pub struct QueryError {
    pub operation: &'static str,
    pub message: String,
}

impl QueryError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
