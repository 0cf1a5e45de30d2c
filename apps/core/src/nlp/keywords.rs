//! Keyword extraction.
//!
//! Lower-cases the input and splits it into runs of ASCII word characters
//! (`[0-9A-Za-z_]`), keeping each distinct token once in first-occurrence order.
//! Apostrophes split words, so "can't" yields "can" and "t".

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]+").expect("Invalid regex: word pattern"));

/// Loose bidirectional substring match used by the classifier and the matcher.
///
/// Catches plurals and variants ("headaches" ~ "headache") but also produces
/// false positives such as "ear" ~ "fear". Both are part of the observable
/// behaviour.
pub fn overlaps(keyword: &str, term: &str) -> bool {
    term.contains(keyword) || keyword.contains(term)
}

/// Tokenizer producing the distinct lowercase keywords of a text
pub struct KeywordExtractor {
    pattern: &'static Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            pattern: &WORD_PATTERN,
        }
    }

    /// Extract distinct keywords in first-occurrence order
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut seen = HashSet::new();

        self.pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| seen.insert(*token))
            .map(str::to_string)
            .collect()
    }
}
