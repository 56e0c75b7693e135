// src/analyze/mod.rs
//! The scoring engine proper: tokenization, segmentation, aspect
//! extraction, score calculation, and keyword ranking, plus the pure
//! per-game entry point that ties them together.

pub mod extract;
pub mod keywords;
pub mod scoring;
pub mod segment;
pub mod tokenize;

use std::collections::BTreeMap;

use crate::lexicon::{Aspect, Lexicon};
use crate::stopwords::Stopwords;
use crate::types::{Review, ReviewSignals};

// Re-export convenient types.
pub use crate::analyze::extract::{AspectCount, AspectExtractor, Extraction, WordWeightMap};
pub use crate::analyze::keywords::KeywordGenerator;
pub use crate::analyze::scoring::{sentiment_score, NEUTRAL_SCORE};
pub use crate::analyze::segment::sentences;
pub use crate::analyze::tokenize::{
    ContentTokenizer, LinderaAnalyzer, MorphAnalyzer, Morpheme, PartOfSpeech, TabularAnalyzer,
};

/// Run the full engine over one game's review corpus.
///
/// Total for any well-typed input: an empty or unparseable corpus produces
/// neutral scores, an empty keyword map, and zero playtime.
pub fn analyze_reviews(
    analyzer: &dyn MorphAnalyzer,
    stopwords: &Stopwords,
    lexicon: &Lexicon,
    reviews: &[Review],
) -> ReviewSignals {
    let tokenizer = ContentTokenizer::new(analyzer, stopwords);

    let extraction = AspectExtractor::new(lexicon, tokenizer)
        .scan(reviews.iter().map(|r| r.text.as_str()));
    let aspect_scores = score_extraction(&extraction);

    let keywords = KeywordGenerator::new(tokenizer, lexicon.keywords)
        .generate(reviews.iter().map(|r| r.text.as_str()));

    ReviewSignals {
        aspect_scores,
        keywords,
        average_playtime_hours: average_playtime_hours(reviews),
    }
}

/// Map every aspect's raw counts to its bounded score. Aspects missing from
/// the extraction still get the neutral default.
pub fn score_extraction(extraction: &Extraction) -> BTreeMap<Aspect, f64> {
    Aspect::ALL
        .into_iter()
        .map(|aspect| {
            let count = extraction.counts.get(&aspect).copied().unwrap_or_default();
            (aspect, sentiment_score(count))
        })
        .collect()
}

/// Mean playtime across reviews, in whole hours truncated toward zero.
pub fn average_playtime_hours(reviews: &[Review]) -> u64 {
    if reviews.is_empty() {
        return 0;
    }
    let total: u64 = reviews.iter().map(|r| r.playtime_minutes).sum();
    let mean_minutes = total as f64 / reviews.len() as f64;
    (mean_minutes / 60.0).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_playtimes(minutes: &[u64]) -> Vec<Review> {
        minutes.iter().map(|&m| Review::new("", m)).collect()
    }

    #[test]
    fn average_playtime_floors_toward_zero() {
        // mean 130 minutes → 2 hours
        assert_eq!(average_playtime_hours(&with_playtimes(&[120, 180, 90])), 2);
        // mean 59 minutes → 0 hours
        assert_eq!(average_playtime_hours(&with_playtimes(&[59])), 0);
        assert_eq!(average_playtime_hours(&with_playtimes(&[60])), 1);
    }

    #[test]
    fn average_playtime_of_empty_corpus_is_zero() {
        assert_eq!(average_playtime_hours(&[]), 0);
    }

    #[test]
    fn score_extraction_defaults_every_aspect_to_neutral() {
        let scores = score_extraction(&Extraction::default());
        assert_eq!(scores.len(), Aspect::ALL.len());
        for aspect in Aspect::ALL {
            assert_eq!(scores[&aspect], NEUTRAL_SCORE);
        }
    }
}
