//! MyMemory backend: `GET {base_url}/get?q=..&langpair=en|<target>`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{SOURCE_LANGUAGE, TranslateError, Translator};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetResponse {
    response_data: Option<ResponseData>,
    #[serde(default)]
    response_status: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// `responseStatus` arrives as a number or a numeric string.
fn status_code(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Client for the MyMemory translation API.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MyMemoryClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, api_key }
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let langpair = format!("{SOURCE_LANGUAGE}|{target}");
        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        let response = self
            .http
            .get(format!("{}/get", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Http { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let parsed: GetResponse = serde_json::from_slice(&bytes).map_err(|e| TranslateError::Parse(e.to_string()))?;

        match status_code(&parsed.response_status) {
            Some(200) => {}
            Some(code) => return Err(TranslateError::Http { status: code }),
            None => return Err(TranslateError::Parse("missing responseStatus".to_string())),
        }

        let translated = parsed
            .response_data
            .and_then(|d| d.translated_text)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        if translated.is_empty() {
            return Err(TranslateError::Empty);
        }
        Ok(translated)
    }
}
