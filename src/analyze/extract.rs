// src/analyze/extract.rs
//! Aspect-sentiment extraction: sentences → trigger matches → lexicon hits.
//!
//! One pass over a review corpus accumulates, per aspect, the raw polarity
//! counts (positive/negative, or hard/easy for difficulty) and a per-word
//! contribution map kept for explainability. Counts only ever grow during a
//! pass; nothing is reset mid-corpus.

use std::collections::BTreeMap;

use tracing::info;

use crate::analyze::segment::sentences;
use crate::analyze::tokenize::ContentTokenizer;
use crate::lexicon::{Aspect, Lexicon};

/// Raw evidence for one aspect. `plus`/`minus` mean positive/negative for
/// polarity aspects and hard/easy for the difficulty aspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AspectCount {
    pub plus: u32,
    pub minus: u32,
}

impl AspectCount {
    pub fn new(plus: u32, minus: u32) -> Self {
        Self { plus, minus }
    }

    pub fn total(self) -> u32 {
        self.plus + self.minus
    }
}

/// Per-word contribution counts for one aspect.
pub type WordWeightMap = BTreeMap<String, u32>;

/// Result of one corpus pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub counts: BTreeMap<Aspect, AspectCount>,
    pub word_hits: BTreeMap<Aspect, WordWeightMap>,
}

impl Extraction {
    /// Empty extraction with every aspect present at zero, so downstream
    /// scoring always sees a complete map.
    pub fn new() -> Self {
        let mut ex = Self::default();
        for aspect in Aspect::ALL {
            ex.counts.insert(aspect, AspectCount::default());
            ex.word_hits.insert(aspect, WordWeightMap::new());
        }
        ex
    }

    fn bump(&mut self, aspect: Aspect, word: &str, plus: bool) {
        let count = self.counts.entry(aspect).or_default();
        if plus {
            count.plus += 1;
        } else {
            count.minus += 1;
        }
        *self
            .word_hits
            .entry(aspect)
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
    }
}

/// Scans review texts against a lexicon.
#[derive(Clone, Copy)]
pub struct AspectExtractor<'a> {
    lexicon: &'a Lexicon,
    tokenizer: ContentTokenizer<'a>,
}

impl<'a> AspectExtractor<'a> {
    pub fn new(lexicon: &'a Lexicon, tokenizer: ContentTokenizer<'a>) -> Self {
        Self { lexicon, tokenizer }
    }

    /// One pass over the whole corpus. Review order does not affect the
    /// result; counts are cumulative across all texts.
    pub fn scan<'t>(&self, texts: impl IntoIterator<Item = &'t str>) -> Extraction {
        let mut extraction = Extraction::new();
        for text in texts {
            self.scan_text(text, &mut extraction);
            dev_log_scan(text, &extraction);
        }
        extraction
    }

    fn scan_text(&self, text: &str, extraction: &mut Extraction) {
        for sentence in sentences(text) {
            // Tokenize lazily, at most once per sentence, no matter how many
            // aspects the sentence triggers.
            let mut tokens: Option<Vec<String>> = None;

            for aspect in Aspect::ALL {
                let triggered = self
                    .lexicon
                    .triggers_for(aspect)
                    .iter()
                    .any(|expr| sentence.contains(expr.as_str()));
                if !triggered {
                    continue;
                }

                let tokens = tokens.get_or_insert_with(|| self.tokenizer.tokens(sentence));
                for word in tokens.iter() {
                    if aspect.is_difficulty() {
                        // Dedicated hard/easy pair; generic sentiment words
                        // are ignored inside difficulty sentences.
                        if self.lexicon.hard.contains(word) {
                            extraction.bump(aspect, word, true);
                        } else if self.lexicon.easy.contains(word) {
                            extraction.bump(aspect, word, false);
                        }
                    } else if self.lexicon.positive.contains(word) {
                        extraction.bump(aspect, word, true);
                    } else if self.lexicon.negative.contains(word) {
                        extraction.bump(aspect, word, false);
                    }
                }
            }
        }
    }
}

/// Dev logging gate: ANALYZER_DEV_LOG=1 and a debug build.
fn dev_logging_enabled() -> bool {
    cfg!(debug_assertions) && std::env::var("ANALYZER_DEV_LOG").ok().as_deref() == Some("1")
}

/// Short anonymized id for a review text. Raw text never reaches the logs.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn dev_log_scan(text: &str, extraction: &Extraction) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let totals: Vec<String> = extraction
        .counts
        .iter()
        .map(|(aspect, c)| format!("{aspect}:{}+{}", c.plus, c.minus))
        .collect();
    info!(target: "extract", %id, totals = ?totals, "scanned review");
}
