//! Scrape pipeline: fetch → extract → normalize → summarize.
//!
//! Stages run strictly in order and the first failure short-circuits the
//! rest. Translation and persistence are left to the caller.

use std::sync::Arc;

use blogurdu_core::{AppConfig, Error, PipelineError};
use serde::Serialize;

use crate::extract::{Extractor, ScrapedDocument, SelectorExtractor};
use crate::fetch::{FetchClient, FetchConfig};
use crate::summarize::{DEFAULT_SENTENCE_LIMIT, summarize};

/// Successful pipeline output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub summary: String,
}

/// Stateless orchestrator over the pipeline stages.
///
/// Cheap to clone; concurrent `process` calls share nothing but the HTTP
/// connection pool.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: FetchClient,
    extractor: Arc<dyn Extractor>,
    sentence_limit: usize,
}

impl Pipeline {
    pub fn new(fetcher: FetchClient, extractor: Arc<dyn Extractor>, sentence_limit: usize) -> Self {
        Self { fetcher, extractor, sentence_limit }
    }

    /// Build a pipeline with the default extractor from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Ok(Self::new(fetcher, Arc::new(SelectorExtractor::default()), config.summary_sentences))
    }

    /// Run every stage for `url`.
    ///
    /// The URL must already be validated.
    pub async fn process(&self, url: &str) -> Result<PipelineResult, PipelineError> {
        let html = self.fetcher.fetch_html(url).await.inspect_err(|e| {
            tracing::debug!(stage = "fetch", %url, error = %e, "pipeline stage failed");
        })?;

        self.process_html(&html).inspect_err(|e| {
            tracing::debug!(stage = %e.stage(), %url, error = %e, "pipeline stage failed");
        })
    }

    /// Run the CPU-bound stages over already fetched HTML.
    pub fn process_html(&self, html: &str) -> Result<PipelineResult, PipelineError> {
        let extracted = self.extractor.extract(html)?;
        let document = ScrapedDocument::new(extracted.title, &extracted.body_text)?;
        let summary = self.summarize(document.content());
        let (title, content, word_count) = document.into_parts();

        Ok(PipelineResult { title, content, word_count, summary })
    }

    /// Summarize content with this pipeline's sentence limit.
    pub fn summarize(&self, content: &str) -> String {
        summarize(content, self.sentence_limit)
    }

    pub fn sentence_limit(&self) -> usize {
        self.sentence_limit
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        let fetcher = FetchClient::new(FetchConfig::default()).expect("default HTTP client builds");
        Self::new(fetcher, Arc::new(SelectorExtractor::default()), DEFAULT_SENTENCE_LIMIT)
    }
}
