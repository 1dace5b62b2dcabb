//! Unified error types for blogurdu.
//!
//! Scraping failures are classified per pipeline stage. Every variant of
//! `FetchError` renders a distinct user-facing message.

use std::fmt;

use tokio_rusqlite::rusqlite;

/// Failure of the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The server answered 404.
    #[error("Blog post not found (404)")]
    NotFound,

    /// The server answered 403.
    #[error("Access denied to the blog post")]
    Forbidden,

    /// The request timed out or the connection was aborted.
    #[error("Request timed out. The blog site may be slow to respond.")]
    Timeout,

    /// Any other transport failure or non-2xx status.
    #[error("Failed to scrape blog: {0}")]
    FetchFailed(String),
}

/// Failure of the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Every body fallback produced empty text.
    #[error("No content found on the page")]
    NoContentFound,
}

/// Pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failing stage of a scrape pipeline run, forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PipelineError {
    /// The stage this error came from.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) => Stage::Fetch,
            PipelineError::Extract(_) => Stage::Extract,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Fetch(FetchError::NotFound) => "FETCH_NOT_FOUND",
            PipelineError::Fetch(FetchError::Forbidden) => "FETCH_FORBIDDEN",
            PipelineError::Fetch(FetchError::Timeout) => "FETCH_TIMEOUT",
            PipelineError::Fetch(FetchError::FetchFailed(_)) => "FETCH_FAILED",
            PipelineError::Extract(ExtractError::NoContentFound) => "NO_CONTENT_FOUND",
        }
    }
}

/// Unified error types for the blogurdu service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input URL, rejected before the pipeline runs.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Scrape pipeline failure with stage attribution.
    #[error("{code}: {0}", code = .0.code())]
    Pipeline(#[from] PipelineError),

    /// No blog with the requested id.
    #[error("BLOG_NOT_FOUND: {0}")]
    BlogNotFound(String),

    /// Database operation failed.
    #[error("DATABASE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("DATABASE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// HTTP client or translator could not be built from configuration.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-readable code, the prefix of the display string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::Pipeline(e) => e.code(),
            Error::BlogNotFound(_) => "BLOG_NOT_FOUND",
            Error::Database(_) | Error::MigrationFailed(_) => "DATABASE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Message meant for the end user, without the code prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidUrl(msg) => format!("Invalid URL: {msg}"),
            Error::Pipeline(e) => e.to_string(),
            Error::BlogNotFound(_) => "Blog not found".to_string(),
            Error::Database(e) => e.to_string(),
            Error::MigrationFailed(msg) | Error::Config(msg) => msg.clone(),
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Pipeline(err.into())
    }
}

impl From<ExtractError> for Error {
    fn from(err: ExtractError) -> Self {
        Error::Pipeline(err.into())
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
