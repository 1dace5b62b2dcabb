//! Translator error types.

use std::sync::Arc;

/// Errors from a translation backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TranslateError {
    /// Backend did not answer within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// Non-success HTTP status from the backend.
    #[error("translation backend returned HTTP {status}")]
    Http { status: u16 },

    /// Transport failure.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Backend answered with an empty translation.
    #[error("empty translation")]
    Empty,

    /// The backend cannot translate into the requested language.
    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { TranslateError::Timeout } else { TranslateError::Network(Arc::new(err)) }
    }
}
