//! Article content extraction using ordered selector fallbacks.
//!
//! ### Algorithm
//! 1. Parse HTML with `scraper` and detach noise subtrees (scripts, styles,
//!    navigation, headers, footers, asides, comment and sidebar regions).
//! 2. Resolve the title: `<title>`, first `<h1>`, `og:title`, then a literal
//!    fallback.
//! 3. Resolve the body: first matching content container, else `<body>`.
//! 4. Fail with `NoContentFound` when the body is empty.
//!
//! ### Stable Abstraction
//! - Uses the `Extractor` trait so the pipeline does not depend on a
//!   particular extraction engine.

pub mod normalize;
pub mod selectors;

pub use normalize::{Normalized, ScrapedDocument, normalize};
pub use selectors::{BODY_SELECTORS, FALLBACK_TITLE, NOISE_SELECTORS, TITLE_RULES, TitleRule, TitleSource};

use std::collections::HashSet;

use blogurdu_core::{Error, ExtractError};
use scraper::{ElementRef, Html, Selector};

/// Configuration for content extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Elements stripped before detection.
    pub noise_selectors: Vec<String>,

    /// Content containers, tried in order.
    pub body_selectors: Vec<String>,

    /// Title used when no title rule matches.
    pub fallback_title: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            noise_selectors: NOISE_SELECTORS.iter().map(|s| s.to_string()).collect(),
            body_selectors: BODY_SELECTORS.iter().map(|s| s.to_string()).collect(),
            fallback_title: FALLBACK_TITLE.to_string(),
        }
    }
}

/// Result of content extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Resolved page title, never empty
    pub title: String,
    /// Raw body text, not yet normalized
    pub body_text: String,
    /// Selector that produced the body
    pub body_selector: String,
}

/// Stable extractor trait for content extraction.
pub trait Extractor: Send + Sync {
    /// Extract the title and main text from HTML.
    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractError>;
}

struct CompiledTitleRule {
    selector: Selector,
    source: TitleSource,
}

/// Extractor driven by ordered CSS selector chains.
pub struct SelectorExtractor {
    noise: Vec<Selector>,
    body: Vec<(String, Selector)>,
    body_fallback: Selector,
    titles: Vec<CompiledTitleRule>,
    fallback_title: String,
}

fn compile(selector: &str) -> Result<Selector, Error> {
    Selector::parse(selector).map_err(|e| Error::Config(format!("invalid selector {selector:?}: {e}")))
}

impl SelectorExtractor {
    /// Compile the selector chains in `config`.
    pub fn new(config: ExtractConfig) -> Result<Self, Error> {
        let noise = config
            .noise_selectors
            .iter()
            .map(|s| compile(s))
            .collect::<Result<Vec<_>, _>>()?;

        let body = config
            .body_selectors
            .into_iter()
            .map(|s| compile(&s).map(|sel| (s, sel)))
            .collect::<Result<Vec<_>, _>>()?;

        let titles = TITLE_RULES
            .iter()
            .map(|rule| Ok(CompiledTitleRule { selector: compile(rule.selector)?, source: rule.source }))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            noise,
            body,
            body_fallback: compile(selectors::BODY_FALLBACK_SELECTOR)?,
            titles,
            fallback_title: config.fallback_title,
        })
    }

    /// Detach every element matching a noise selector.
    fn strip_noise(&self, document: &mut Html) {
        let ids: Vec<_> = {
            let doc: &Html = document;
            self.noise
                .iter()
                .flat_map(|selector| select_attached(doc, selector).map(|el| el.id()))
                .collect()
        };

        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }

    fn resolve_title(&self, document: &Html) -> String {
        self.titles
            .iter()
            .find_map(|rule| {
                let element = select_attached(document, &rule.selector).next()?;
                let value = match rule.source {
                    TitleSource::Text => element_text(&element),
                    TitleSource::Attr(name) => element.value().attr(name)?.to_string(),
                };
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            })
            .unwrap_or_else(|| self.fallback_title.clone())
    }

    /// Text of the first body selector matching any element, else `<body>`.
    fn resolve_body(&self, document: &Html) -> (String, String) {
        let matched = self.body.iter().find_map(|(name, selector)| {
            let elements = outermost(select_attached(document, selector).collect());
            if elements.is_empty() {
                return None;
            }
            let text = elements.iter().map(element_text).collect::<Vec<_>>().join(" ");
            Some((name.clone(), text.trim().to_string()))
        });

        match matched {
            Some((name, text)) if !text.is_empty() => (name, text),
            _ => {
                let text = select_attached(document, &self.body_fallback)
                    .map(|el| element_text(&el))
                    .collect::<Vec<_>>()
                    .join(" ");
                (selectors::BODY_FALLBACK_SELECTOR.to_string(), text.trim().to_string())
            }
        }
    }
}

impl Default for SelectorExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default()).expect("built-in selectors are valid")
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, html: &str) -> Result<ExtractionResult, ExtractError> {
        let mut document = Html::parse_document(html);
        self.strip_noise(&mut document);

        let title = self.resolve_title(&document);
        let (body_selector, body_text) = self.resolve_body(&document);

        if body_text.is_empty() {
            return Err(ExtractError::NoContentFound);
        }

        tracing::debug!(%body_selector, chars = body_text.len(), "extracted body");

        Ok(ExtractionResult { title, body_text, body_selector })
    }
}

/// Matching elements still attached under the document root.
///
/// `Html::select` walks every node in the tree arena, detached ones
/// included, so queries go through the root element instead.
fn select_attached<'a, 'b>(document: &'a Html, selector: &'b Selector) -> scraper::element_ref::Select<'a, 'b> {
    document.root_element().select(selector)
}

/// Drop matches nested inside another match so their text is counted once.
fn outermost(elements: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
    elements
        .into_iter()
        .filter(|el| !el.ancestors().any(|node| ids.contains(&node.id())))
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Extract with the default selector chains.
pub fn extract_content(html: &str) -> Result<ExtractionResult, ExtractError> {
    SelectorExtractor::default().extract(html)
}
