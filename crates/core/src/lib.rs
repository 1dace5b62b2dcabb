//! Core types and shared functionality for blogurdu.
//!
//! This crate provides:
//! - Blog and translation storage with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;

pub use config::{AppConfig, ConfigError, TranslatorConfig, TranslatorProvider};
pub use error::{Error, ExtractError, FetchError, PipelineError, Stage};
pub use store::{Blog, BlogDb, BlogWithTranslation, NewBlog, NewTranslation, Translation};
