//! Input URL validation, run before the scrape pipeline.

/// Error type for URL validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("missing host")]
    MissingHost,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for blogurdu_core::Error {
    fn from(err: UrlError) -> Self {
        blogurdu_core::Error::InvalidUrl(err.to_string())
    }
}

/// Validate a user-submitted URL.
///
/// Rules:
/// 1. Trim leading/trailing whitespace
/// 2. Must parse as an absolute URL (no scheme defaulting)
/// 3. Scheme must be http or https
/// 4. Host must be present
///
/// The parsed URL is returned for inspection only; callers keep the trimmed
/// input string as the de-duplication key.
pub fn validate_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost),
    }

    Ok(parsed)
}
