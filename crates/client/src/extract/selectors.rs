//! Ordered selector chains used by the extractor.
//!
//! Order matters in every list below: earlier entries win.

/// Elements removed before title or body detection.
pub const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "nav",
    "header",
    "footer",
    "aside",
    ".comments",
    "#comments",
    ".sidebar",
    "#sidebar",
    "[role=\"complementary\"]",
    "[role=\"navigation\"]",
];

/// Primary content containers. The first selector matching any element wins.
pub const BODY_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".content",
    ".post-body",
    ".article-content",
    "main",
    ".main-content",
    "[role=\"main\"]",
];

/// Selector used when no content container matches.
pub const BODY_FALLBACK_SELECTOR: &str = "body";

/// Title used when every title rule comes up empty.
pub const FALLBACK_TITLE: &str = "Untitled Blog Post";

/// Where a title rule reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Text content of the first matching element.
    Text,
    /// An attribute of the first matching element.
    Attr(&'static str),
}

/// One step of the title fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleRule {
    pub selector: &'static str,
    pub source: TitleSource,
}

pub const TITLE_RULES: &[TitleRule] = &[
    TitleRule { selector: "title", source: TitleSource::Text },
    TitleRule { selector: "h1", source: TitleSource::Text },
    TitleRule { selector: "meta[property=\"og:title\"]", source: TitleSource::Attr("content") },
];
