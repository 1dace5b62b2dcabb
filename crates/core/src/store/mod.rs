//! SQLite-backed storage for scraped blogs and their translations.
//!
//! Two tables, `blogs` and `translations`, accessed through async CRUD
//! methods on [`BlogDb`] via tokio-rusqlite:
//!
//! - Versioned schema migrations
//! - WAL mode for concurrent access
//! - Foreign key from `translations.blog_id` to `blogs.id`

pub mod blogs;
pub mod connection;
pub mod migrations;
pub mod translations;

pub use crate::Error;

pub use blogs::{Blog, NewBlog};
pub use connection::BlogDb;
pub use translations::{BlogWithTranslation, NewTranslation, Translation};

/// Timestamp format used for `created_at` columns.
///
/// Fixed-width microsecond precision keeps lexical order equal to
/// chronological order.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
