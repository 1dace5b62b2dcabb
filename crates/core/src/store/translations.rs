//! Translation CRUD operations and blog/translation joins.

use super::blogs::{BLOG_COLUMNS, Blog, blog_from_row};
use super::connection::BlogDb;
use super::now_timestamp;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension};

/// Summary of a blog with its Urdu rendering.
///
/// The schema allows several translations per blog; the service creates
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: i64,
    pub blog_id: i64,
    pub summary: String,
    pub urdu_summary: String,
    pub created_at: String,
}

/// Insert payload for [`BlogDb::create_translation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTranslation {
    pub blog_id: i64,
    pub summary: String,
    pub urdu_summary: String,
}

/// Blog fields at the top level with the translation nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogWithTranslation {
    #[serde(flatten)]
    pub blog: Blog,
    pub translation: Translation,
}

const TRANSLATION_COLUMNS: &str = "id, blog_id, summary, urdu_summary, created_at";

fn translation_from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Translation> {
    Ok(Translation {
        id: row.get(offset)?,
        blog_id: row.get(offset + 1)?,
        summary: row.get(offset + 2)?,
        urdu_summary: row.get(offset + 3)?,
        created_at: row.get(offset + 4)?,
    })
}

impl BlogDb {
    /// Insert a translation for an existing blog.
    ///
    /// Fails with a database error if `blog_id` does not reference a blog.
    pub async fn create_translation(&self, translation: NewTranslation) -> Result<Translation, Error> {
        let created_at = now_timestamp();
        self.conn
            .call(move |conn| -> Result<Translation, Error> {
                conn.execute(
                    "INSERT INTO translations (blog_id, summary, urdu_summary, created_at)
                    VALUES (?1, ?2, ?3, ?4)",
                    params![translation.blog_id, &translation.summary, &translation.urdu_summary, &created_at],
                )?;
                let id = conn.last_insert_rowid();

                Ok(Translation {
                    id,
                    blog_id: translation.blog_id,
                    summary: translation.summary,
                    urdu_summary: translation.urdu_summary,
                    created_at,
                })
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a translation unless the blog already has one.
    ///
    /// Returns the blog's first translation and whether this call inserted it.
    /// The check and the insert run as one statement.
    pub async fn create_translation_once(&self, translation: NewTranslation) -> Result<(Translation, bool), Error> {
        let created_at = now_timestamp();
        self.conn
            .call(move |conn| -> Result<(Translation, bool), Error> {
                let inserted = conn.execute(
                    "INSERT INTO translations (blog_id, summary, urdu_summary, created_at)
                    SELECT ?1, ?2, ?3, ?4
                    WHERE NOT EXISTS (SELECT 1 FROM translations WHERE blog_id = ?1)",
                    params![translation.blog_id, &translation.summary, &translation.urdu_summary, &created_at],
                )? == 1;

                let sql =
                    format!("SELECT {TRANSLATION_COLUMNS} FROM translations WHERE blog_id = ?1 ORDER BY id ASC LIMIT 1");
                let stored = conn.query_row(&sql, params![translation.blog_id], |row| translation_from_row(row, 0))?;
                Ok((stored, inserted))
            })
            .await
            .map_err(Error::from)
    }

    /// Get the first translation stored for a blog.
    pub async fn find_translation_by_blog_id(&self, blog_id: i64) -> Result<Option<Translation>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Translation>, Error> {
                let sql =
                    format!("SELECT {TRANSLATION_COLUMNS} FROM translations WHERE blog_id = ?1 ORDER BY id ASC LIMIT 1");
                let translation = conn
                    .query_row(&sql, params![blog_id], |row| translation_from_row(row, 0))
                    .optional()?;
                Ok(translation)
            })
            .await
            .map_err(Error::from)
    }

    /// Get a blog together with its translation.
    ///
    /// Returns None if the blog is missing or has no translation yet.
    pub async fn find_blog_with_translation(&self, blog_id: i64) -> Result<Option<BlogWithTranslation>, Error> {
        let Some(blog) = self.find_blog_by_id(blog_id).await? else {
            return Ok(None);
        };
        let Some(translation) = self.find_translation_by_blog_id(blog_id).await? else {
            return Ok(None);
        };
        Ok(Some(BlogWithTranslation { blog, translation }))
    }

    /// List the most recently created translations with their blogs.
    ///
    /// Ordered by translation creation time, newest first.
    pub async fn list_recent_translations(&self, limit: usize) -> Result<Vec<BlogWithTranslation>, Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.conn
            .call(move |conn| -> Result<Vec<BlogWithTranslation>, Error> {
                let blog_cols = BLOG_COLUMNS
                    .split(", ")
                    .map(|c| format!("b.{c}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let translation_cols = TRANSLATION_COLUMNS
                    .split(", ")
                    .map(|c| format!("t.{c}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "SELECT {blog_cols}, {translation_cols}
                    FROM blogs b
                    INNER JOIN translations t ON t.blog_id = b.id
                    ORDER BY t.created_at DESC, t.id DESC
                    LIMIT ?1"
                );

                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![limit], |row| {
                    Ok(BlogWithTranslation { blog: blog_from_row(row, 0)?, translation: translation_from_row(row, 6)? })
                })?;

                let mut results = Vec::new();
                for row in rows {
                    results.push(row?);
                }
                Ok(results)
            })
            .await
            .map_err(Error::from)
    }
}
