//! Request flow for processing a blog URL.
//!
//! validate → reuse stored blog if any → scrape → store → summarize →
//! translate → store translation. Translation failures never fail the request.

use std::sync::Arc;

use blogurdu_client::{Pipeline, Translator, URDU, validate_url};
use blogurdu_core::{Blog, BlogDb, BlogWithTranslation, Error, NewBlog, NewTranslation, Translation};
use serde::Serialize;

/// Stored in place of the Urdu summary when translation fails.
pub const TRANSLATION_UNAVAILABLE: &str = "ترجمہ دستیاب نہیں ہے۔";

pub const MSG_ALREADY_PROCESSED: &str = "Blog already processed";
pub const MSG_PROCESSED: &str = "Blog processed successfully";

/// Upper bound on `limit` for the recent translations list.
pub const MAX_RECENT_LIMIT: usize = 50;

/// Result of `POST /api/blogs/process`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub blog: Blog,
    pub translation: Translation,
    pub message: &'static str,
}

/// Shared application service. Cheap to clone.
#[derive(Clone)]
pub struct BlogService {
    db: BlogDb,
    pipeline: Pipeline,
    translator: Arc<dyn Translator>,
    recent_limit_default: usize,
}

impl BlogService {
    pub fn new(db: BlogDb, pipeline: Pipeline, translator: Arc<dyn Translator>, recent_limit_default: usize) -> Self {
        Self { db, pipeline, translator, recent_limit_default }
    }

    /// Scrape, summarize, translate and persist `url`, reusing stored work.
    ///
    /// Blogs are de-duplicated by the trimmed input string.
    pub async fn process(&self, url: &str) -> Result<ProcessOutcome, Error> {
        validate_url(url)?;
        let url = url.trim();

        let blog = match self.db.find_blog_by_url(url).await? {
            Some(blog) => {
                if let Some(translation) = self.db.find_translation_by_blog_id(blog.id).await? {
                    tracing::debug!(blog_id = blog.id, %url, "blog already processed");
                    return Ok(ProcessOutcome { blog, translation, message: MSG_ALREADY_PROCESSED });
                }
                blog
            }
            None => {
                let scraped = self.pipeline.process(url).await?;
                let (blog, inserted) = self
                    .db
                    .find_or_create_blog(NewBlog {
                        url: url.to_string(),
                        title: scraped.title,
                        content: scraped.content,
                        word_count: i64::try_from(scraped.word_count).unwrap_or(i64::MAX),
                    })
                    .await?;
                if !inserted {
                    tracing::debug!(blog_id = blog.id, %url, "blog stored by a concurrent request");
                }
                blog
            }
        };

        let summary = self.pipeline.summarize(&blog.content);
        let urdu_summary = self.translate(&summary).await;
        let (translation, inserted) = self
            .db
            .create_translation_once(NewTranslation { blog_id: blog.id, summary, urdu_summary })
            .await?;

        if !inserted {
            return Ok(ProcessOutcome { blog, translation, message: MSG_ALREADY_PROCESSED });
        }

        tracing::info!(blog_id = blog.id, %url, words = blog.word_count, "blog processed");
        Ok(ProcessOutcome { blog, translation, message: MSG_PROCESSED })
    }

    /// Blog with its translation, or `BlogNotFound`.
    pub async fn blog(&self, id: i64) -> Result<BlogWithTranslation, Error> {
        self.db
            .find_blog_with_translation(id)
            .await?
            .ok_or_else(|| Error::BlogNotFound(id.to_string()))
    }

    /// Most recent translations, newest first.
    ///
    /// Missing or non-positive limits fall back to the configured default;
    /// larger limits are capped.
    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<BlogWithTranslation>, Error> {
        self.db.list_recent_translations(self.effective_limit(limit)).await
    }

    fn effective_limit(&self, limit: Option<i64>) -> usize {
        limit
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(self.recent_limit_default)
            .min(MAX_RECENT_LIMIT)
    }

    async fn translate(&self, summary: &str) -> String {
        match self.translator.translate(summary, URDU).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(translator = self.translator.name(), error = %e, "translation failed, storing placeholder");
                TRANSLATION_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, http::StatusCode, routing::get};
    use blogurdu_client::{DictionaryTranslator, TranslateError};
    use blogurdu_core::{FetchError, PipelineError};

    pub(crate) const POST_HTML: &str = "<html><head><title>T</title></head><body><nav>Menu</nav><article>Hello world. This is fine. Third one. Fourth dropped.</article></body></html>";

    pub(crate) struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Timeout)
        }
    }

    pub(crate) async fn serve_blog() -> String {
        let router = Router::new()
            .route("/post", get(|| async { POST_HTML }))
            .route("/gone", get(|| async { (StatusCode::NOT_FOUND, "gone") }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub(crate) async fn service_with(translator: Arc<dyn Translator>) -> BlogService {
        let db = BlogDb::open_in_memory().await.unwrap();
        BlogService::new(db, Pipeline::default(), translator, 6)
    }

    pub(crate) async fn service() -> BlogService {
        service_with(Arc::new(DictionaryTranslator::default())).await
    }

    #[tokio::test]
    async fn test_process_new_blog() {
        let base = serve_blog().await;
        let service = service().await;
        let outcome = service.process(&format!("{base}/post")).await.unwrap();

        assert_eq!(outcome.message, MSG_PROCESSED);
        assert_eq!(outcome.blog.title, "T");
        assert_eq!(outcome.blog.content, "Hello world. This is fine. Third one. Fourth dropped.");
        assert_eq!(outcome.blog.word_count, 9);
        assert_eq!(outcome.translation.blog_id, outcome.blog.id);
        assert_eq!(outcome.translation.summary, "Hello world. This is fine. Third one.");
        assert!(outcome.translation.urdu_summary.contains("دنیا"));
    }

    #[tokio::test]
    async fn test_process_same_url_reuses_records() {
        let base = serve_blog().await;
        let service = service().await;
        let url = format!("{base}/post");

        let first = service.process(&url).await.unwrap();
        let second = service.process(&format!("  {url} ")).await.unwrap();

        assert_eq!(second.message, MSG_ALREADY_PROCESSED);
        assert_eq!(second.blog, first.blog);
        assert_eq!(second.translation, first.translation);
    }

    #[tokio::test]
    async fn test_process_concurrent_requests_store_once() {
        let base = serve_blog().await;
        let service = service().await;
        let url = format!("{base}/post");

        let (a, b) = tokio::join!(service.process(&url), service.process(&url));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(a.blog.id, b.blog.id);
        assert_eq!(a.translation.id, b.translation.id);
        let processed = [a.message, b.message].iter().filter(|m| **m == MSG_PROCESSED).count();
        assert_eq!(processed, 1);
        assert_eq!(service.recent(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_process_stored_blog_without_translation() {
        let service = service().await;
        let url = "http://127.0.0.1:9/never-fetched";
        let blog = service
            .db
            .create_blog(NewBlog {
                url: url.to_string(),
                title: "Stored".to_string(),
                content: "One. Two. Three. Four.".to_string(),
                word_count: 4,
            })
            .await
            .unwrap();

        let outcome = service.process(url).await.unwrap();
        assert_eq!(outcome.message, MSG_PROCESSED);
        assert_eq!(outcome.blog.id, blog.id);
        assert_eq!(outcome.translation.summary, "One. Two. Three.");
    }

    #[tokio::test]
    async fn test_process_translation_failure_uses_placeholder() {
        let base = serve_blog().await;
        let service = service_with(Arc::new(FailingTranslator)).await;
        let outcome = service.process(&format!("{base}/post")).await.unwrap();
        assert_eq!(outcome.translation.urdu_summary, TRANSLATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_process_rejects_invalid_url() {
        let service = service().await;
        for input in ["", "not a url", "ftp://example.com/x", "example.com/post"] {
            let err = service.process(input).await.unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(_)), "input: {input:?}");
        }
    }

    #[tokio::test]
    async fn test_process_fetch_failure_stores_nothing() {
        let base = serve_blog().await;
        let service = service().await;
        let url = format!("{base}/gone");

        let err = service.process(&url).await.unwrap_err();
        assert!(matches!(err, Error::Pipeline(PipelineError::Fetch(FetchError::NotFound))));
        assert!(service.db.find_blog_by_url(&url).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blog_lookup() {
        let base = serve_blog().await;
        let service = service().await;
        let outcome = service.process(&format!("{base}/post")).await.unwrap();

        let found = service.blog(outcome.blog.id).await.unwrap();
        assert_eq!(found.blog, outcome.blog);
        assert!(matches!(service.blog(9999).await, Err(Error::BlogNotFound(_))));
    }

    #[tokio::test]
    async fn test_effective_limit() {
        let service = service().await;
        assert_eq!(service.effective_limit(None), 6);
        assert_eq!(service.effective_limit(Some(0)), 6);
        assert_eq!(service.effective_limit(Some(-3)), 6);
        assert_eq!(service.effective_limit(Some(2)), 2);
        assert_eq!(service.effective_limit(Some(500)), MAX_RECENT_LIMIT);
    }
}
