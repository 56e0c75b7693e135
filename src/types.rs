// src/types.rs
//! Data model: reviews in, enriched records out.
//!
//! Metadata fields are caller-supplied and pass through the engine verbatim;
//! the engine never invents or validates them. Maps are `BTreeMap` so the
//! serialized output is byte-stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::Aspect;

/// One user review: free text plus the author's playtime in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    #[serde(default)]
    pub playtime_minutes: u64,
}

impl Review {
    pub fn new(text: impl Into<String>, playtime_minutes: u64) -> Self {
        Self {
            text: text.into(),
            playtime_minutes,
        }
    }
}

/// Externally supplied game metadata, merged into the output untouched.
/// Every field defaults so partial upstream records still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMetadata {
    pub game_title: String,
    pub steam_id: Option<u64>,
    pub twitch_id: Option<u64>,
    pub genres: Vec<String>,
    pub webpage_url: String,
    pub img_url: String,
    pub price: f64,
    pub sale_price: f64,
    pub is_single_player: bool,
    pub is_multi_player: bool,
    pub is_device_windows: bool,
    pub is_device_mac: bool,
    pub developer_name: String,
    pub short_details: String,
    pub release_date: String,
    pub tags: Vec<String>,
    pub total_views: u64,
    pub active_user: u64,
    pub active_chat_user: u64,
}

/// One game's unit of work: its metadata and its pre-fetched review corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameCorpus {
    #[serde(default)]
    pub metadata: GameMetadata,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Everything the engine computes for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSignals {
    /// Aspect → sentiment score in [1.0, 5.0]; 3.0 when evidence is absent.
    pub aspect_scores: BTreeMap<Aspect, f64>,
    /// Salient term → rounded TF-IDF weight.
    pub keywords: BTreeMap<String, f64>,
    /// Mean playtime in whole hours, truncated; 0 without reviews.
    pub average_playtime_hours: u64,
}

/// Final output record: pass-through metadata plus computed signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedGame {
    #[serde(flatten)]
    pub metadata: GameMetadata,
    #[serde(flatten)]
    pub signals: ReviewSignals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_deserializes_from_partial_record() {
        let meta: GameMetadata =
            serde_json::from_str(r#"{"game_title": "Example", "price": 19.99}"#).expect("parse");
        assert_eq!(meta.game_title, "Example");
        assert_eq!(meta.price, 19.99);
        assert_eq!(meta.steam_id, None);
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn enriched_game_flattens_on_serialization() {
        let game = EnrichedGame {
            metadata: GameMetadata {
                game_title: "Example".into(),
                ..GameMetadata::default()
            },
            signals: ReviewSignals {
                aspect_scores: BTreeMap::from([(Aspect::Music, 4.5)]),
                keywords: BTreeMap::new(),
                average_playtime_hours: 2,
            },
        };
        let value = serde_json::to_value(&game).expect("serialize");
        assert_eq!(value["game_title"], "Example");
        assert_eq!(value["aspect_scores"]["music"], 4.5);
        assert_eq!(value["average_playtime_hours"], 2);
    }

    #[test]
    fn review_playtime_defaults_to_zero() {
        let review: Review = serde_json::from_str(r#"{"text": "面白い"}"#).expect("parse");
        assert_eq!(review.playtime_minutes, 0);
    }
}
