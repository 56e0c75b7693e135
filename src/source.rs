// src/source.rs
//! Collaborator seam for review acquisition.
//!
//! Fetching (store APIs, pagination, rate limits) lives outside this crate;
//! callers hand the engine a `ReviewSource`. The in-memory implementation
//! below covers tests and the JSON driver, which reads pre-fetched corpora
//! from disk.

use std::collections::HashMap;

use anyhow::Result;

use crate::types::Review;

#[async_trait::async_trait]
pub trait ReviewSource {
    /// All reviews for one game, in stable order.
    async fn fetch_reviews(&self, game_id: u64) -> Result<Vec<Review>>;
    fn name(&self) -> &'static str;
}

/// Pre-loaded reviews keyed by game id. Unknown ids yield an empty corpus,
/// mirroring how an exhausted upstream pager behaves.
#[derive(Debug, Clone, Default)]
pub struct StaticReviews {
    by_game: HashMap<u64, Vec<Review>>,
}

impl StaticReviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, game_id: u64, reviews: Vec<Review>) -> Self {
        self.by_game.insert(game_id, reviews);
        self
    }
}

#[async_trait::async_trait]
impl ReviewSource for StaticReviews {
    async fn fetch_reviews(&self, game_id: u64) -> Result<Vec<Review>> {
        Ok(self.by_game.get(&game_id).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "StaticReviews"
    }
}
