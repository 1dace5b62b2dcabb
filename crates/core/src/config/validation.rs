//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::{AppConfig, TranslatorProvider};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `summary_sentences` is outside 1..=20
    /// - `recent_limit_default` is 0
    /// - an API translator has an empty `base_url`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if !(1..=20).contains(&self.summary_sentences) {
            return Err(ConfigError::Invalid {
                field: "summary_sentences".into(),
                reason: "must be between 1 and 20".into(),
            });
        }

        if self.recent_limit_default == 0 {
            return Err(ConfigError::Invalid {
                field: "recent_limit_default".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.translator.provider != TranslatorProvider::Dictionary {
            match self.translator.resolved_base_url() {
                Some(url) if !url.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::Missing {
                        field: "translator.base_url".into(),
                        hint: "Set BLOGURDU_TRANSLATOR__BASE_URL environment variable".into(),
                    });
                }
            }
        }

        if self.translator.provider != TranslatorProvider::Dictionary && self.translator.generic_fallback {
            tracing::warn!(
                provider = ?self.translator.provider,
                "translator.generic_fallback only applies to the dictionary provider; ignoring"
            );
        }

        Ok(())
    }
}
