//! Client code for blogurdu.
//!
//! This crate provides the scrape pipeline (fetch, extraction, normalization,
//! summarization) and the translation backends used by the server.

pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod summarize;
pub mod translate;

pub use extract::{
    ExtractConfig, ExtractionResult, Extractor, ScrapedDocument, SelectorExtractor, extract_content, normalize,
};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, UrlError, validate_url};
pub use pipeline::{Pipeline, PipelineResult};
pub use summarize::{DEFAULT_SENTENCE_LIMIT, summarize};
pub use translate::{
    Dictionary, DictionaryTranslator, LibreTranslateClient, MyMemoryClient, TranslateError, Translator, URDU,
    build_translator,
};
