// src/analyze/scoring.rs
//! Maps raw aspect counts onto the bounded 1–5 sentiment scale.
//!
//! ratio = (plus − minus) / total ∈ [−1, 1], score = 3 + 2·ratio, rounded to
//! two decimals and clamped. Zero evidence is exactly neutral: 3.0, with no
//! rounding drift possible since 3 + 2·0 is exact.

use crate::analyze::extract::AspectCount;

/// Neutral default when an aspect has no evidence at all.
pub const NEUTRAL_SCORE: f64 = 3.0;

/// Compute the sentiment score for one aspect.
///
/// For polarity aspects `plus`/`minus` are positive/negative hits; for the
/// difficulty aspect they are hard/easy hits, so a higher score reads as
/// "more difficult".
pub fn sentiment_score(count: AspectCount) -> f64 {
    let total = count.total();
    if total == 0 {
        return NEUTRAL_SCORE;
    }
    let ratio = (f64::from(count.plus) - f64::from(count.minus)) / f64::from(total);
    let raw = 3.0 + ratio * 2.0;
    round_to(raw, 2).clamp(1.0, 5.0)
}

/// Round half away from zero at `places` decimals.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_evidence_is_exactly_neutral() {
        assert_eq!(sentiment_score(AspectCount::default()), 3.0);
    }

    #[test]
    fn balanced_evidence_is_exactly_neutral() {
        assert_eq!(sentiment_score(AspectCount::new(2, 2)), 3.0);
        assert_eq!(sentiment_score(AspectCount::new(17, 17)), 3.0);
    }

    #[test]
    fn all_positive_maxes_out() {
        assert_eq!(sentiment_score(AspectCount::new(3, 0)), 5.0);
    }

    #[test]
    fn all_negative_bottoms_out() {
        assert_eq!(sentiment_score(AspectCount::new(0, 3)), 1.0);
    }

    #[test]
    fn mixed_evidence_lands_on_the_linear_scale() {
        // ratio 1/3 → 3.6667 → 3.67
        assert_eq!(sentiment_score(AspectCount::new(2, 1)), 3.67);
        // ratio -1/3 → 2.3333 → 2.33
        assert_eq!(sentiment_score(AspectCount::new(1, 2)), 2.33);
        // ratio 1/2 → 4.0
        assert_eq!(sentiment_score(AspectCount::new(3, 1)), 4.0);
    }

    #[test]
    fn scores_stay_in_bounds() {
        for plus in 0..=20u32 {
            for minus in 0..=20u32 {
                let s = sentiment_score(AspectCount::new(plus, minus));
                assert!(
                    (1.0..=5.0).contains(&s),
                    "out of range for {plus}/{minus}: {s}"
                );
            }
        }
    }

    #[test]
    fn monotone_in_plus_hits() {
        for minus in 0..=10u32 {
            let mut prev = sentiment_score(AspectCount::new(0, minus));
            for plus in 1..=10u32 {
                let next = sentiment_score(AspectCount::new(plus, minus));
                assert!(next >= prev, "plus {plus}, minus {minus}: {next} < {prev}");
                prev = next;
            }
        }
    }

    #[test]
    fn monotone_in_minus_hits() {
        for plus in 0..=10u32 {
            let mut prev = sentiment_score(AspectCount::new(plus, 0));
            for minus in 1..=10u32 {
                let next = sentiment_score(AspectCount::new(plus, minus));
                assert!(next <= prev, "plus {plus}, minus {minus}: {next} > {prev}");
                prev = next;
            }
        }
    }

    #[test]
    fn rounded_to_two_decimals() {
        for plus in 0..=9u32 {
            for minus in 0..=9u32 {
                let s = sentiment_score(AspectCount::new(plus, minus));
                assert_eq!(round_to(s, 2), s, "not 2-decimal stable for {plus}/{minus}");
            }
        }
    }
}
