//! LibreTranslate backend.
//!
//! `POST {base_url}/translate` with `{q, source, target, format, api_key?}`,
//! answered by `{translatedText}`.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SOURCE_LANGUAGE, TranslateError, Translator};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Client for a LibreTranslate instance.
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, api_key }
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let start = Instant::now();
        let body = TranslateRequest {
            q: text,
            source: SOURCE_LANGUAGE,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, elapsed = ?start.elapsed(), "libretranslate response");
        if !status.is_success() {
            return Err(TranslateError::Http { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let parsed: TranslateResponse =
            serde_json::from_slice(&bytes).map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = parsed.translated_text.trim();
        if translated.is_empty() {
            return Err(TranslateError::Empty);
        }
        Ok(translated.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        let text = format!(
            "{}|{}|{}|{}|{}",
            body["q"].as_str().unwrap_or_default(),
            body["source"].as_str().unwrap_or_default(),
            body["target"].as_str().unwrap_or_default(),
            body["format"].as_str().unwrap_or_default(),
            body["api_key"].as_str().unwrap_or("-"),
        );
        Json(json!({ "translatedText": text }))
    }

    #[tokio::test]
    async fn test_translate_sends_request_shape() {
        let base = serve(Router::new().route("/translate", post(echo))).await;
        let client = LibreTranslateClient::new(reqwest::Client::new(), format!("{base}/"), None);
        let out = client.translate("hello", "ur").await.unwrap();
        assert_eq!(out, "hello|en|ur|text|-");
    }

    #[tokio::test]
    async fn test_translate_includes_api_key() {
        let base = serve(Router::new().route("/translate", post(echo))).await;
        let client = LibreTranslateClient::new(reqwest::Client::new(), base, Some("secret".into()));
        let out = client.translate("hi", "ur").await.unwrap();
        assert!(out.ends_with("|secret"));
    }

    #[tokio::test]
    async fn test_translate_http_error() {
        let router = Router::new().route(
            "/translate",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad" }))) }),
        );
        let base = serve(router).await;
        let client = LibreTranslateClient::new(reqwest::Client::new(), base, None);
        let err = client.translate("hi", "ur").await.unwrap_err();
        assert!(matches!(err, TranslateError::Http { status: 400 }));
    }

    #[tokio::test]
    async fn test_translate_empty_and_malformed() {
        let router = Router::new()
            .route("/empty/translate", post(|| async { Json(json!({ "translatedText": "  " })) }))
            .route("/bad/translate", post(|| async { "not json" }));
        let base = serve(router).await;

        let client = LibreTranslateClient::new(reqwest::Client::new(), format!("{base}/empty"), None);
        assert!(matches!(client.translate("hi", "ur").await, Err(TranslateError::Empty)));

        let client = LibreTranslateClient::new(reqwest::Client::new(), format!("{base}/bad"), None);
        assert!(matches!(client.translate("hi", "ur").await, Err(TranslateError::Parse(_))));
    }
}
