//! Extractive summaries: the leading sentences of the content.

use std::sync::LazyLock;

use regex::Regex;

/// Sentences kept when no limit is configured.
pub const DEFAULT_SENTENCE_LIMIT: usize = 3;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

/// Split `content` into sentence fragments.
///
/// Splits on runs of `.`, `!` and `?` and drops fragments that are empty
/// after trimming. Terminators are not kept.
pub fn sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join the first `sentence_limit` sentences with `". "` and end with `"."`.
///
/// Content without any sentence is used whole as a single fragment.
pub fn summarize(content: &str, sentence_limit: usize) -> String {
    let fragments = sentences(content);
    if fragments.is_empty() {
        return format!("{}.", content.trim());
    }

    let selected: Vec<&str> = fragments.into_iter().take(sentence_limit).collect();
    format!("{}.", selected.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_three_sentences() {
        assert_eq!(summarize("A. B. C. D.", 3), "A. B. C.");
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(summarize("Why? Because! It works... Done.", 3), "Why. Because. It works.");
    }

    #[test]
    fn test_no_terminator() {
        assert_eq!(summarize("Only one sentence here", 3), "Only one sentence here.");
    }

    #[test]
    fn test_fewer_sentences_than_limit() {
        assert_eq!(summarize("First. Second.", 3), "First. Second.");
    }

    #[test]
    fn test_custom_limit() {
        assert_eq!(summarize("One. Two. Three.", 1), "One.");
    }

    #[test]
    fn test_only_punctuation() {
        assert_eq!(summarize("...", 3), "....");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(summarize("", 3), ".");
    }

    #[test]
    fn test_end_to_end_article_text() {
        let content = "Hello world. This is fine. Third one. Fourth dropped.";
        assert_eq!(summarize(content, DEFAULT_SENTENCE_LIMIT), "Hello world. This is fine. Third one.");
    }

    #[test]
    fn test_sentences_drop_empty_fragments() {
        assert_eq!(sentences("A.. B!? . C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_deterministic() {
        let content = "Alpha beta. Gamma delta! Epsilon?";
        assert_eq!(summarize(content, 2), summarize(content, 2));
    }
}
