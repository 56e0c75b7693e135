// tests/keyword_retention.rs
// Keyword generator behavior as configured through the lexicon TOML:
// percentile retention, the floor of one, and rounding precision.

use game_review_analyzer::{Engine, Lexicon, PartOfSpeech, Review, Stopwords, TabularAnalyzer};

fn lexicon_with(keywords_toml: &str) -> Lexicon {
    let toml = format!(
        r#"
[triggers]
music = ["音楽"]

positive = []
negative = []
hard = []
easy = []

{keywords_toml}
"#
    );
    Lexicon::from_toml_str(&toml).expect("load test lexicon")
}

fn analyzer() -> TabularAnalyzer {
    TabularAnalyzer::new()
        .with_word("冒険", PartOfSpeech::Noun)
        .with_word("戦闘", PartOfSpeech::Noun)
        .with_word("音楽", PartOfSpeech::Noun)
        .with_word("探索", PartOfSpeech::Noun)
        .with_word("世界", PartOfSpeech::Noun)
}

fn corpus() -> Vec<Review> {
    vec![
        Review::new("冒険冒険冒険戦闘", 0),
        Review::new("音楽探索", 0),
        Review::new("世界冒険", 0),
    ]
}

#[test]
fn tiny_top_percent_still_retains_one_keyword() {
    let eng = Engine::new(
        analyzer(),
        Stopwords::empty(),
        lexicon_with("[keywords]\ntop_percent = 0.1"),
    );
    let signals = eng.analyze_game(&corpus());
    assert_eq!(signals.keywords.len(), 1);
}

#[test]
fn retention_count_uses_ceiling_of_the_percentile() {
    // 5 candidate terms at 25% → ceil(1.25) = 2 retained.
    let eng = Engine::new(
        analyzer(),
        Stopwords::empty(),
        lexicon_with("[keywords]\ntop_percent = 25.0"),
    );
    let signals = eng.analyze_game(&corpus());
    assert_eq!(signals.keywords.len(), 2);
    // 冒険 dominates: three hits in one review plus one in another.
    assert!(signals.keywords.contains_key("冒険"));
}

#[test]
fn full_retention_keeps_the_whole_vocabulary() {
    let eng = Engine::new(
        analyzer(),
        Stopwords::empty(),
        lexicon_with("[keywords]\ntop_percent = 100.0"),
    );
    let signals = eng.analyze_game(&corpus());
    assert_eq!(signals.keywords.len(), 5);
}

#[test]
fn weights_respect_configured_decimal_places() {
    let eng = Engine::new(
        analyzer(),
        Stopwords::empty(),
        lexicon_with("[keywords]\ntop_percent = 100.0\ndecimal_places = 1"),
    );
    let signals = eng.analyze_game(&corpus());
    assert!(!signals.keywords.is_empty());
    for (term, weight) in &signals.keywords {
        assert_eq!(
            (weight * 10.0).round() / 10.0,
            *weight,
            "weight of {term} not rounded to one place"
        );
    }
}

#[test]
fn default_params_apply_when_keywords_section_is_absent() {
    let eng = Engine::new(analyzer(), Stopwords::empty(), lexicon_with(""));
    assert_eq!(eng.lexicon().keywords.top_percent, 25.0);
    assert_eq!(eng.lexicon().keywords.decimal_places, 2);
}

#[test]
fn untokenizable_corpus_yields_no_keywords() {
    let eng = Engine::new(
        analyzer(),
        Stopwords::empty(),
        lexicon_with("[keywords]\ntop_percent = 100.0"),
    );
    // Nothing in these texts is in the analyzer table.
    let signals = eng.analyze_game(&[Review::new("未知語だけ", 0), Review::new("???", 0)]);
    assert!(signals.keywords.is_empty());
}

#[test]
fn stopworded_terms_never_become_keywords() {
    let eng = Engine::new(
        analyzer(),
        Stopwords::from_words(["音楽"]),
        lexicon_with("[keywords]\ntop_percent = 100.0"),
    );
    let signals = eng.analyze_game(&corpus());
    assert!(!signals.keywords.contains_key("音楽"));
    assert!(signals.keywords.contains_key("冒険"));
}
