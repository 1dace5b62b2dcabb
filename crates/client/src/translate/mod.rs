//! Translation backends.
//!
//! One `Translator` trait with three implementations, picked at startup from
//! `translator.provider`:
//!
//! - **dictionary**: offline word substitution from an injected table.
//! - **libretranslate**: `POST {base_url}/translate`.
//! - **mymemory**: `GET {base_url}/get`.
//!
//! Source language is always English.

pub mod dictionary;
pub mod error;
pub mod libre;
pub mod mymemory;

pub use dictionary::{Dictionary, DictionaryTranslator, URDU};
pub use error::TranslateError;
pub use libre::LibreTranslateClient;
pub use mymemory::MyMemoryClient;

use std::sync::Arc;

use async_trait::async_trait;
use blogurdu_core::{Error, TranslatorConfig, TranslatorProvider};

/// Language every backend translates from.
pub const SOURCE_LANGUAGE: &str = "en";

/// Translate English text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &'static str;

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

/// Build the configured translator.
pub fn build_translator(config: &TranslatorConfig) -> Result<Arc<dyn Translator>, Error> {
    match config.provider {
        TranslatorProvider::Dictionary => {
            let translator = DictionaryTranslator::default().with_generic_fallback(config.generic_fallback);
            Ok(Arc::new(translator))
        }
        TranslatorProvider::LibreTranslate => {
            let (http, base_url, api_key) = remote_parts(config)?;
            Ok(Arc::new(LibreTranslateClient::new(http, base_url, api_key)))
        }
        TranslatorProvider::MyMemory => {
            let (http, base_url, api_key) = remote_parts(config)?;
            Ok(Arc::new(MyMemoryClient::new(http, base_url, api_key)))
        }
    }
}

fn remote_parts(config: &TranslatorConfig) -> Result<(reqwest::Client, String, Option<String>), Error> {
    let base_url = config
        .resolved_base_url()
        .ok_or_else(|| Error::Config("translator.base_url is required".to_string()))?;
    let http = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| Error::Config(format!("failed to build translator HTTP client: {e}")))?;
    let api_key = config.api_key.clone().filter(|k| !k.is_empty());

    tracing::debug!(provider = ?config.provider, %base_url, "translator configured");
    Ok((http, base_url, api_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_is_dictionary() {
        let translator = build_translator(&TranslatorConfig::default()).unwrap();
        assert_eq!(translator.name(), "dictionary");
    }

    #[test]
    fn test_build_remote_providers() {
        let config = TranslatorConfig { provider: TranslatorProvider::LibreTranslate, ..Default::default() };
        assert_eq!(build_translator(&config).unwrap().name(), "libretranslate");

        let config = TranslatorConfig {
            provider: TranslatorProvider::MyMemory,
            base_url: Some("http://127.0.0.1:9".into()),
            ..Default::default()
        };
        assert_eq!(build_translator(&config).unwrap().name(), "mymemory");
    }

    #[tokio::test]
    async fn test_trait_object_translates() {
        let translator: Arc<dyn Translator> =
            Arc::new(DictionaryTranslator::new(Dictionary::from_pairs([("water", "پانی")])));
        assert_eq!(translator.translate("Water!", URDU).await.unwrap(), "پانی!");
    }
}
