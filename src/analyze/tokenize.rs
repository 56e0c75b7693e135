// src/analyze/tokenize.rs
//! Tokenization and normalization: raw text → content-word base forms.
//!
//! Morphological analysis sits behind [`MorphAnalyzer`] so the engine can be
//! driven either by the real IPADIC-backed analyzer or by a deterministic
//! table for tests. Analyzers are plain values owned by the caller; the
//! filtering pipeline on top of them is pure.

use std::collections::HashMap;

use lindera::{DictionaryConfig, DictionaryKind, Mode, Tokenizer, TokenizerConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::stopwords::Stopwords;

/// Coarse grammatical category. Only content categories survive filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Verb,
    Other,
}

impl PartOfSpeech {
    fn is_content(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Adjective | PartOfSpeech::Verb
        )
    }
}

/// One analyzed unit: dictionary base form plus its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub base: String,
    pub pos: PartOfSpeech,
}

impl Morpheme {
    pub fn new(base: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            base: base.into(),
            pos,
        }
    }
}

/// Morphological analysis seam. Implementations must be side-effect free:
/// the same text always yields the same morpheme sequence.
///
/// Malformed input is not an error: an analyzer that cannot process a text
/// returns an empty sequence, which downstream code reads as "no signal".
pub trait MorphAnalyzer: Send + Sync {
    fn morphemes(&self, text: &str) -> Vec<Morpheme>;
}

/// Production analyzer backed by lindera with the embedded IPADIC
/// dictionary. IPADIC detail layout: field 0 is the part of speech
/// (名詞/形容詞/動詞/…), field 6 the dictionary base form.
pub struct LinderaAnalyzer {
    inner: Tokenizer,
}

impl LinderaAnalyzer {
    pub fn new() -> anyhow::Result<Self> {
        let dictionary = DictionaryConfig {
            kind: Some(DictionaryKind::IPADIC),
            path: None,
        };
        let config = TokenizerConfig {
            dictionary,
            user_dictionary: None,
            mode: Mode::Normal,
        };
        let inner = Tokenizer::from_config(config)
            .map_err(|e| anyhow::anyhow!("failed to load IPADIC tokenizer: {e}"))?;
        Ok(Self { inner })
    }
}

impl MorphAnalyzer for LinderaAnalyzer {
    fn morphemes(&self, text: &str) -> Vec<Morpheme> {
        let mut tokens = match self.inner.tokenize(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!(error = %e, "morphological analysis failed; treating text as empty");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens.iter_mut() {
            let (pos, base) = {
                let details = token.get_details().unwrap_or_default();
                let pos = match details.first().copied() {
                    Some("名詞") => PartOfSpeech::Noun,
                    Some("形容詞") => PartOfSpeech::Adjective,
                    Some("動詞") => PartOfSpeech::Verb,
                    _ => PartOfSpeech::Other,
                };
                // Unknown words carry no base form ("*" or truncated details);
                // fall back to the surface.
                let base = details
                    .get(6)
                    .filter(|b| **b != "*")
                    .map(|b| b.to_string());
                (pos, base)
            };
            let base = base.unwrap_or_else(|| token.text.to_string());
            out.push(Morpheme { base, pos });
        }
        out
    }
}

/// Deterministic analyzer over an explicit surface table, segmenting by
/// longest match and skipping anything unlisted. Used in tests and wherever
/// a small controlled vocabulary beats a full dictionary.
#[derive(Debug, Clone, Default)]
pub struct TabularAnalyzer {
    entries: HashMap<String, Morpheme>,
    max_chars: usize,
}

impl TabularAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` → (`base`, `pos`). Returns self for chaining.
    pub fn with_entry(
        mut self,
        surface: impl Into<String>,
        base: impl Into<String>,
        pos: PartOfSpeech,
    ) -> Self {
        let surface = surface.into();
        self.max_chars = self.max_chars.max(surface.chars().count());
        self.entries.insert(surface, Morpheme::new(base, pos));
        self
    }

    /// Shorthand for entries whose base form equals the surface.
    pub fn with_word(self, surface: &str, pos: PartOfSpeech) -> Self {
        self.with_entry(surface, surface, pos)
    }
}

impl MorphAnalyzer for TabularAnalyzer {
    fn morphemes(&self, text: &str) -> Vec<Morpheme> {
        let mut out = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            // Longest registered surface first.
            let bounds: Vec<usize> = rest
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .take(self.max_chars)
                .collect();
            let hit = bounds
                .iter()
                .rev()
                .find_map(|&end| self.entries.get(&rest[..end]).map(|m| (end, m.clone())));
            match hit {
                Some((end, m)) => {
                    out.push(m);
                    rest = &rest[end..];
                }
                None => {
                    let step = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                    rest = &rest[step..];
                }
            }
        }
        out
    }
}

// Module-level filters, compiled once. `\d` and `\w` are Unicode-aware, so
// full-width digits and CJK word characters behave like their ASCII kin.
static RE_ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("digit filter"));
static RE_ALL_SYMBOLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\w\s]+$").expect("symbol filter"));

/// Content-word tokenizer: morphological analysis plus the filter chain
/// (POS, all-digits, all-symbols, stopwords), in that order.
#[derive(Clone, Copy)]
pub struct ContentTokenizer<'a> {
    analyzer: &'a dyn MorphAnalyzer,
    stopwords: &'a Stopwords,
}

impl<'a> ContentTokenizer<'a> {
    pub fn new(analyzer: &'a dyn MorphAnalyzer, stopwords: &'a Stopwords) -> Self {
        Self {
            analyzer,
            stopwords,
        }
    }

    /// Ordered base forms of the content words in `text`, duplicates kept.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.analyzer
            .morphemes(text)
            .into_iter()
            .filter(|m| m.pos.is_content())
            .map(|m| m.base)
            .filter(|w| !RE_ALL_DIGITS.is_match(w))
            .filter(|w| !RE_ALL_SYMBOLS.is_match(w))
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TabularAnalyzer {
        TabularAnalyzer::new()
            .with_word("面白い", PartOfSpeech::Adjective)
            .with_word("ボリューム", PartOfSpeech::Noun)
            .with_word("遊ぶ", PartOfSpeech::Verb)
            .with_word("とても", PartOfSpeech::Other)
            .with_word("123", PartOfSpeech::Noun)
            .with_word("！？", PartOfSpeech::Noun)
            .with_word("こと", PartOfSpeech::Noun)
            .with_entry("高く", "高い", PartOfSpeech::Adjective)
    }

    #[test]
    fn keeps_only_content_words() {
        let sw = Stopwords::empty();
        let a = analyzer();
        let tok = ContentTokenizer::new(&a, &sw);
        assert_eq!(
            tok.tokens("とても面白いボリューム遊ぶ"),
            vec!["面白い", "ボリューム", "遊ぶ"]
        );
    }

    #[test]
    fn maps_surfaces_to_base_forms() {
        let sw = Stopwords::empty();
        let a = analyzer();
        let tok = ContentTokenizer::new(&a, &sw);
        assert_eq!(tok.tokens("高く"), vec!["高い"]);
    }

    #[test]
    fn drops_digit_and_symbol_only_tokens() {
        let sw = Stopwords::empty();
        let a = analyzer();
        let tok = ContentTokenizer::new(&a, &sw);
        assert!(tok.tokens("123！？").is_empty());
    }

    #[test]
    fn drops_stopwords() {
        let sw = Stopwords::from_words(["こと"]);
        let a = analyzer();
        let tok = ContentTokenizer::new(&a, &sw);
        assert!(tok.tokens("こと").is_empty());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let sw = Stopwords::empty();
        let tok = ContentTokenizer::new(&analyzer(), &sw);
        assert_eq!(
            tok.tokens("面白い面白いボリューム"),
            vec!["面白い", "面白い", "ボリューム"]
        );
    }

    #[test]
    fn unknown_spans_yield_no_tokens() {
        let sw = Stopwords::empty();
        let tok = ContentTokenizer::new(&analyzer(), &sw);
        assert!(tok.tokens("未知の文字列").is_empty());
    }

    #[test]
    fn tabular_longest_match_wins() {
        let a = TabularAnalyzer::new()
            .with_word("難易", PartOfSpeech::Noun)
            .with_word("難易度", PartOfSpeech::Noun);
        assert_eq!(
            a.morphemes("難易度"),
            vec![Morpheme::new("難易度", PartOfSpeech::Noun)]
        );
    }
}
