//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (BLOGURDU_*)
//! 2. TOML config file (if BLOGURDU_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Browser-like user agent sent with every scrape request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Which translation backend serves `translate` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorProvider {
    /// Word-for-word substitution from a bundled English→Urdu table.
    #[default]
    Dictionary,
    /// A LibreTranslate instance (`POST /translate`).
    LibreTranslate,
    /// The MyMemory public API (`GET /get`).
    MyMemory,
}

impl TranslatorProvider {
    /// Base URL used when `translator.base_url` is unset.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            TranslatorProvider::Dictionary => None,
            TranslatorProvider::LibreTranslate => Some("https://libretranslate.com"),
            TranslatorProvider::MyMemory => Some("https://api.mymemory.translated.net"),
        }
    }
}

/// Translator backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Set via BLOGURDU_TRANSLATOR__PROVIDER.
    #[serde(default)]
    pub provider: TranslatorProvider,

    /// Override for the provider's API root.
    ///
    /// Set via BLOGURDU_TRANSLATOR__BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key, sent to LibreTranslate as `api_key` and to MyMemory as `key`.
    ///
    /// Set via BLOGURDU_TRANSLATOR__API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout for translation API calls in milliseconds.
    #[serde(default = "default_translator_timeout_ms")]
    pub timeout_ms: u64,

    /// Replace poorly covered dictionary translations with a generic Urdu
    /// sentence. Off unless explicitly enabled.
    #[serde(default)]
    pub generic_fallback: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: TranslatorProvider::Dictionary,
            base_url: None,
            api_key: None,
            timeout_ms: default_translator_timeout_ms(),
            generic_fallback: false,
        }
    }
}

impl TranslatorConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Configured base URL, or the provider default.
    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| self.provider.default_base_url().map(str::to_string))
    }
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BLOGURDU_*)
/// 2. TOML config file (if BLOGURDU_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP API listens on.
    ///
    /// Set via BLOGURDU_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path to the SQLite database.
    ///
    /// Set via BLOGURDU_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for scrape requests.
    ///
    /// Set via BLOGURDU_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Scrape request timeout in milliseconds.
    ///
    /// Set via BLOGURDU_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes accepted per fetched page.
    ///
    /// Set via BLOGURDU_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Number of leading sentences kept in a summary.
    ///
    /// Set via BLOGURDU_SUMMARY_SENTENCES environment variable.
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Page size for the recent translations list when the query omits it.
    #[serde(default = "default_recent_limit")]
    pub recent_limit_default: usize,

    #[serde(default)]
    pub translator: TranslatorConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./blogurdu.sqlite")
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_summary_sentences() -> usize {
    3
}

fn default_recent_limit() -> usize {
    6
}

fn default_translator_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            summary_sentences: default_summary_sentences(),
            recent_limit_default: default_recent_limit(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `BLOGURDU_`; nested keys use `__`
    ///    (`BLOGURDU_TRANSLATOR__PROVIDER=mymemory`)
    /// 2. TOML file from `BLOGURDU_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("BLOGURDU_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("BLOGURDU_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
        assert_eq!(config.db_path, PathBuf::from("./blogurdu.sqlite"));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.summary_sentences, 3);
        assert_eq!(config.recent_limit_default, 6);
        assert_eq!(config.translator.provider, TranslatorProvider::Dictionary);
        assert!(!config.translator.generic_fallback);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
        assert_eq!(config.translator.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_resolved_base_url() {
        let config = TranslatorConfig { provider: TranslatorProvider::MyMemory, ..Default::default() };
        assert_eq!(config.resolved_base_url().as_deref(), Some("https://api.mymemory.translated.net"));

        let config = TranslatorConfig {
            provider: TranslatorProvider::LibreTranslate,
            base_url: Some("http://localhost:5001".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url().as_deref(), Some("http://localhost:5001"));

        assert!(TranslatorConfig::default().resolved_base_url().is_none());
    }

    #[test]
    fn test_load_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "blogurdu.toml",
                r#"
                    timeout_ms = 5000
                    summary_sentences = 2

                    [translator]
                    provider = "libretranslate"
                "#,
            )?;
            jail.set_env("BLOGURDU_CONFIG_FILE", "blogurdu.toml");
            jail.set_env("BLOGURDU_TIMEOUT_MS", "7000");
            jail.set_env("BLOGURDU_TRANSLATOR__PROVIDER", "mymemory");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.timeout_ms, 7000);
            assert_eq!(config.summary_sentences, 2);
            assert_eq!(config.translator.provider, TranslatorProvider::MyMemory);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BLOGURDU_SUMMARY_SENTENCES", "0");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "summary_sentences"));
            Ok(())
        });
    }
}
