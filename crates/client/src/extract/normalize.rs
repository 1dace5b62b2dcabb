//! Whitespace normalization and the scraped document type.

use blogurdu_core::ExtractError;
use serde::Serialize;

/// Body text collapsed to a single paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub content: String,
    pub word_count: usize,
}

/// Collapse every whitespace run (newlines included) into one space and trim.
///
/// Idempotent: normalizing normalized text returns it unchanged.
pub fn normalize(raw: &str) -> Normalized {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    Normalized { content: tokens.join(" "), word_count: tokens.len() }
}

/// A scraped article: title plus normalized, non-empty body.
///
/// `word_count` is always derived from `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedDocument {
    title: String,
    content: String,
    word_count: usize,
}

impl ScrapedDocument {
    /// Normalize `raw_body` and build the document.
    ///
    /// Fails with `NoContentFound` when the body normalizes to nothing.
    pub fn new(title: impl Into<String>, raw_body: &str) -> Result<Self, ExtractError> {
        let Normalized { content, word_count } = normalize(raw_body);
        if content.is_empty() {
            return Err(ExtractError::NoContentFound);
        }
        Ok(Self { title: title.into(), content, word_count })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Split into `(title, content, word_count)`.
    pub fn into_parts(self) -> (String, String, usize) {
        (self.title, self.content, self.word_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        let result = normalize("  Hello\n\n  world\t\tagain \r\n");
        assert_eq!(result.content, "Hello world again");
        assert_eq!(result.word_count, 3);
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = ["", "   ", "a", " a  b\nc ", "\u{a0}x\u{2003}y", "One.\n\nTwo!  Three?"];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.content);
            assert_eq!(once, twice, "input: {input:?}");
        }
    }

    #[test]
    fn test_word_count_matches_tokens() {
        let inputs = ["one two  three", "\nsingle\n", "", "a\tb\nc d"];
        for input in inputs {
            let result = normalize(input);
            let tokens = result.content.split(' ').filter(|t| !t.is_empty()).count();
            assert_eq!(result.word_count, tokens);
        }
    }

    #[test]
    fn test_normalize_empty() {
        let result = normalize(" \n\t ");
        assert_eq!(result.content, "");
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_scraped_document_derives_word_count() {
        let doc = ScrapedDocument::new("T", "Hello   world.\nThis is fine.").unwrap();
        assert_eq!(doc.title(), "T");
        assert_eq!(doc.content(), "Hello world. This is fine.");
        assert_eq!(doc.word_count(), 5);
    }

    #[test]
    fn test_scraped_document_rejects_empty_body() {
        assert_eq!(ScrapedDocument::new("T", "  \n "), Err(ExtractError::NoContentFound));
    }

    #[test]
    fn test_scraped_document_json() {
        let doc = ScrapedDocument::new("T", "a b").unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["wordCount"], 2);
    }
}
