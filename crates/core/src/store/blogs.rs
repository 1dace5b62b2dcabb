//! Blog CRUD operations.

use super::connection::BlogDb;
use super::now_timestamp;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension};

/// A scraped blog post.
///
/// Created once per distinct URL string; later requests for the same URL
/// reuse this record instead of scraping again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub content: String,
    pub word_count: i64,
    pub created_at: String,
}

/// Insert payload for [`BlogDb::create_blog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub url: String,
    pub title: String,
    pub content: String,
    pub word_count: i64,
}

pub(crate) const BLOG_COLUMNS: &str = "id, url, title, content, word_count, created_at";

/// Map a row selected with [`BLOG_COLUMNS`] starting at `offset`.
pub(crate) fn blog_from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Blog> {
    Ok(Blog {
        id: row.get(offset)?,
        url: row.get(offset + 1)?,
        title: row.get(offset + 2)?,
        content: row.get(offset + 3)?,
        word_count: row.get(offset + 4)?,
        created_at: row.get(offset + 5)?,
    })
}

impl BlogDb {
    /// Insert a blog and return it with its assigned id.
    ///
    /// Fails with a database error if the URL is already stored.
    pub async fn create_blog(&self, blog: NewBlog) -> Result<Blog, Error> {
        let created_at = now_timestamp();
        self.conn
            .call(move |conn| -> Result<Blog, Error> {
                conn.execute(
                    "INSERT INTO blogs (url, title, content, word_count, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![&blog.url, &blog.title, &blog.content, blog.word_count, &created_at],
                )?;
                let id = conn.last_insert_rowid();

                Ok(Blog {
                    id,
                    url: blog.url,
                    title: blog.title,
                    content: blog.content,
                    word_count: blog.word_count,
                    created_at,
                })
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a blog unless one with the same URL is already stored.
    ///
    /// Returns the stored row and whether this call inserted it. The check and
    /// the insert run as one statement, so concurrent callers for one URL all
    /// get the same row.
    pub async fn find_or_create_blog(&self, blog: NewBlog) -> Result<(Blog, bool), Error> {
        let created_at = now_timestamp();
        self.conn
            .call(move |conn| -> Result<(Blog, bool), Error> {
                let inserted = conn.execute(
                    "INSERT INTO blogs (url, title, content, word_count, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(url) DO NOTHING",
                    params![&blog.url, &blog.title, &blog.content, blog.word_count, &created_at],
                )? == 1;

                let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE url = ?1");
                let stored = conn.query_row(&sql, params![&blog.url], |row| blog_from_row(row, 0))?;
                Ok((stored, inserted))
            })
            .await
            .map_err(Error::from)
    }

    /// Get a blog by id.
    ///
    /// Returns None if no blog has that id.
    pub async fn find_blog_by_id(&self, id: i64) -> Result<Option<Blog>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Blog>, Error> {
                let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = ?1");
                let blog = conn
                    .query_row(&sql, params![id], |row| blog_from_row(row, 0))
                    .optional()?;
                Ok(blog)
            })
            .await
            .map_err(Error::from)
    }

    /// Get the blog stored for an exact URL string.
    ///
    /// Returns None if the URL was never processed.
    pub async fn find_blog_by_url(&self, url: &str) -> Result<Option<Blog>, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Blog>, Error> {
                let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE url = ?1");
                let blog = conn
                    .query_row(&sql, params![url], |row| blog_from_row(row, 0))
                    .optional()?;
                Ok(blog)
            })
            .await
            .map_err(Error::from)
    }
}
