// src/analyze/keywords.rs
//! Corpus-wide keyword salience via TF-IDF.
//!
//! Each review is one pseudo-document. Term weights use raw in-document
//! counts with smoothed log IDF, ln((1+N)/(1+df)) + 1, and every document
//! vector is L2-normalized before summation so long reviews cannot drown the
//! corpus. The top slice of the vocabulary by aggregate weight survives.
//!
//! Every degenerate corpus (no reviews, nothing tokenizable, vocabulary of
//! one-character terms only) maps to an empty result, never an error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::analyze::scoring::round_to;
use crate::analyze::tokenize::ContentTokenizer;
use crate::lexicon::KeywordParams;

/// Tokenizes reviews and ranks their vocabulary.
#[derive(Clone, Copy)]
pub struct KeywordGenerator<'a> {
    tokenizer: ContentTokenizer<'a>,
    params: KeywordParams,
}

impl<'a> KeywordGenerator<'a> {
    pub fn new(tokenizer: ContentTokenizer<'a>, params: KeywordParams) -> Self {
        Self { tokenizer, params }
    }

    /// Tokenize every review independently and rank the corpus vocabulary.
    pub fn generate<'t>(&self, texts: impl IntoIterator<Item = &'t str>) -> BTreeMap<String, f64> {
        let docs: Vec<Vec<String>> = texts
            .into_iter()
            .map(|text| self.tokenizer.tokens(text))
            .collect();
        rank_terms(&docs, &self.params)
    }
}

/// TF-IDF ranking over pre-tokenized documents.
pub fn rank_terms(docs: &[Vec<String>], params: &KeywordParams) -> BTreeMap<String, f64> {
    if docs.iter().all(|doc| doc.is_empty()) {
        debug!("every document tokenized to nothing; skipping keyword ranking");
        return BTreeMap::new();
    }

    // Document frequency over the whole corpus. Empty documents still count
    // toward N; they just contribute no terms.
    let n_docs = docs.len();
    let mut df: HashMap<&str, u32> = HashMap::new();
    for doc in docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    let idf = |term: &str| -> f64 {
        let df = f64::from(df.get(term).copied().unwrap_or(0));
        ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
    };

    // Aggregate L2-normalized per-document weights. Sorted maps keep the
    // floating-point summation order fixed, so reruns are byte-identical.
    let mut corpus: BTreeMap<&str, f64> = BTreeMap::new();
    for doc in docs {
        if doc.is_empty() {
            continue;
        }
        let mut tf: BTreeMap<&str, u32> = BTreeMap::new();
        for term in doc {
            *tf.entry(term.as_str()).or_insert(0) += 1;
        }
        let row: Vec<(&str, f64)> = tf
            .into_iter()
            .map(|(term, count)| (term, f64::from(count) * idf(term)))
            .collect();
        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm <= 0.0 {
            continue;
        }
        for (term, weight) in row {
            *corpus.entry(term).or_insert(0.0) += weight / norm;
        }
    }

    // Single-character terms are noise in this corpus.
    let mut candidates: Vec<(&str, f64)> = corpus
        .into_iter()
        .filter(|(term, _)| term.chars().count() > 1)
        .collect();
    if candidates.is_empty() {
        debug!("no multi-character terms survived; skipping keyword ranking");
        return BTreeMap::new();
    }

    // Weight descending, term ascending as a deterministic tie-break.
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let retain = ((candidates.len() as f64) * params.top_percent / 100.0).ceil() as usize;
    let retain = retain.clamp(1, candidates.len());
    candidates.truncate(retain);

    candidates
        .into_iter()
        .map(|(term, weight)| (term.to_string(), round_to(weight, params.decimal_places)))
        .collect()
}
