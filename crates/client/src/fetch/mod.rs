//! HTTP fetch stage of the scrape pipeline.
//!
//! ### Request
//! - Single GET, no retries
//! - Browser-like User-Agent and bounded timeout (default: 30s)
//! - Max body bytes: 5MB (configurable)
//!
//! ### Failure Classification
//! - 404 → `FetchError::NotFound`
//! - 403 → `FetchError::Forbidden`
//! - timeout / aborted connection → `FetchError::Timeout`
//! - anything else → `FetchError::FetchFailed`
//!
//! Dropping the future returned by [`FetchClient::fetch`] aborts the request.

pub mod url;

use std::time::{Duration, Instant};

use blogurdu_core::{AppConfig, Error, FetchError, config::DEFAULT_USER_AGENT};
use bytes::Bytes;
use reqwest::{Client, StatusCode, header};

pub use self::url::{UrlError, validate_url};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: desktop Chrome)
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: DEFAULT_USER_AGENT.to_string(), max_bytes: 5 * 1024 * 1024, timeout: Duration::from_secs(30) }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The final URL after redirects
    pub final_url: reqwest::Url,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as text, whatever the declared content type.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// HTTP fetch client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    ///
    /// The URL is expected to be validated by the caller.
    pub async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(classify_transport_error)?;

        classify_status(response.status())?;

        if let Some(len) = response.content_length()
            && !usize::try_from(len).is_ok_and(|len| len <= self.config.max_bytes)
        {
            return Err(FetchError::FetchFailed(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();

        let bytes = response.bytes().await.map_err(classify_transport_error)?;

        if bytes.len() > self.config.max_bytes {
            return Err(FetchError::FetchFailed(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { final_url, bytes, fetch_ms })
    }

    /// Fetch a URL and return the body as text.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.fetch(url).await?.text())
    }
}

/// Map a non-success status to its fetch error.
fn classify_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        StatusCode::FORBIDDEN => Err(FetchError::Forbidden),
        s => Err(FetchError::FetchFailed(format!("status {}", s.as_u16()))),
    }
}

fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = err.status() {
        classify_status(status)
            .err()
            .unwrap_or_else(|| FetchError::FetchFailed(err.to_string()))
    } else {
        FetchError::FetchFailed(format!("network error: {}", err))
    }
}
