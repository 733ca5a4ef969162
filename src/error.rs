use std::result;

use thiserror::Error;

/// Error types for search pipeline operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query text rejected before any upstream call
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Filter values that cannot be compiled into a query clause
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Search limit exceeded
    /// This error is returned when a search requests more results than the upstream can return.
    #[error("Search limit exceeded: requested {requested}, maximum is {maximum}")]
    SearchLimitExceeded { requested: usize, maximum: usize },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Upstream answered with a non-success status or an error payload
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Batch document is not a well-formed article set
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Generative service unreachable, misconfigured or returned nothing usable
    #[error("Fallback not offered: {reason}")]
    FallbackUnavailable { reason: String },
}

pub type Result<T> = result::Result<T, SearchError>;

/// Coarse classification of a [`SearchError`]
///
/// Callers branch on this rather than on individual variants: input errors are
/// reported back to the user, retrieval errors fail the search, and an
/// unavailable fallback only means no AI-assisted answer is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Retrieval,
    FallbackUnavailable,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidQuery(_)
            | SearchError::InvalidFilter(_)
            | SearchError::SearchLimitExceeded { .. } => ErrorKind::Input,
            SearchError::RequestError(_)
            | SearchError::JsonError(_)
            | SearchError::ApiError { .. }
            | SearchError::XmlError(_) => ErrorKind::Retrieval,
            SearchError::FallbackUnavailable { .. } => ErrorKind::FallbackUnavailable,
        }
    }

    pub(crate) fn fallback_unavailable(reason: impl Into<String>) -> Self {
        SearchError::FallbackUnavailable {
            reason: reason.into(),
        }
    }

    /// Whether repeating the whole search might succeed
    ///
    /// The pipeline itself never retries; this is for callers that wrap
    /// `search` in their own backoff policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            SearchError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            // Server errors (5xx) and rate limiting (429) are retryable
            SearchError::ApiError { status, message } => {
                (*status >= 500 && *status < 600) || *status == 429 || {
                    let lower_msg = message.to_lowercase();
                    lower_msg.contains("temporarily unavailable")
                        || lower_msg.contains("timeout")
                        || lower_msg.contains("connection")
                }
            }

            SearchError::InvalidQuery(_)
            | SearchError::InvalidFilter(_)
            | SearchError::SearchLimitExceeded { .. }
            | SearchError::JsonError(_)
            | SearchError::XmlError(_)
            | SearchError::FallbackUnavailable { .. } => false,
        }
    }
}
