// src/pipeline.rs
//! Aggregate pipeline: one engine handle, many games.
//!
//! The engine is a cheap-clone handle over immutable parts (analyzer,
//! stopwords, lexicon), so independent games can be scored concurrently
//! without locks. Within one game the extract→score half and the keyword
//! half run on separate blocking tasks and join before the metadata merge.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, info};

use crate::analyze::{
    analyze_reviews, average_playtime_hours, score_extraction, AspectExtractor, ContentTokenizer,
    KeywordGenerator, LinderaAnalyzer, MorphAnalyzer,
};
use crate::lexicon::Lexicon;
use crate::stopwords::Stopwords;
use crate::types::{EnrichedGame, GameCorpus, GameMetadata, Review, ReviewSignals};

struct EngineInner {
    analyzer: Box<dyn MorphAnalyzer>,
    stopwords: Stopwords,
    lexicon: Lexicon,
}

/// Shared, immutable scoring engine. Clones are `Arc`-cheap.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    pub fn new(
        analyzer: impl MorphAnalyzer + 'static,
        stopwords: Stopwords,
        lexicon: Lexicon,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                analyzer: Box::new(analyzer),
                stopwords,
                lexicon,
            }),
        }
    }

    /// Production wiring: IPADIC analyzer, stopwords from disk (degrading to
    /// the embedded list), lexicon from `config/lexicon.toml` or env path.
    pub fn with_defaults() -> Result<Self> {
        let analyzer = LinderaAnalyzer::new()?;
        let stopwords = Stopwords::load_default();
        let lexicon = Lexicon::from_toml().unwrap_or_else(|e| {
            debug!(error = %e, "lexicon config not on disk; using embedded table");
            Lexicon::embedded()
        });
        Ok(Self::new(analyzer, stopwords, lexicon))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.inner.lexicon
    }

    /// Score one game synchronously. Pure: same corpus, same output.
    pub fn analyze_game(&self, reviews: &[Review]) -> ReviewSignals {
        analyze_reviews(
            self.inner.analyzer.as_ref(),
            &self.inner.stopwords,
            &self.inner.lexicon,
            reviews,
        )
    }

    /// Merge one game's computed signals with its pass-through metadata.
    pub fn enrich(&self, metadata: GameMetadata, reviews: &[Review]) -> EnrichedGame {
        EnrichedGame {
            metadata,
            signals: self.analyze_game(reviews),
        }
    }

    /// Score one game with the aspect half and the keyword half running as
    /// separate blocking tasks, joined before returning.
    pub async fn analyze_game_concurrent(&self, reviews: Vec<Review>) -> Result<ReviewSignals> {
        let reviews = Arc::new(reviews);

        let scores = {
            let inner = self.inner.clone();
            let reviews = reviews.clone();
            task::spawn_blocking(move || {
                let tokenizer = ContentTokenizer::new(inner.analyzer.as_ref(), &inner.stopwords);
                let extraction = AspectExtractor::new(&inner.lexicon, tokenizer)
                    .scan(reviews.iter().map(|r| r.text.as_str()));
                score_extraction(&extraction)
            })
        };
        let keywords = {
            let inner = self.inner.clone();
            let reviews = reviews.clone();
            task::spawn_blocking(move || {
                let tokenizer = ContentTokenizer::new(inner.analyzer.as_ref(), &inner.stopwords);
                KeywordGenerator::new(tokenizer, inner.lexicon.keywords)
                    .generate(reviews.iter().map(|r| r.text.as_str()))
            })
        };
        let (aspect_scores, keywords) = tokio::try_join!(scores, keywords)?;

        Ok(ReviewSignals {
            aspect_scores,
            keywords,
            average_playtime_hours: average_playtime_hours(&reviews),
        })
    }

    /// Score a batch of independent games on a worker pool bounded by the
    /// available cores. Output order matches input order.
    pub async fn analyze_batch(&self, games: Vec<GameCorpus>) -> Result<Vec<EnrichedGame>> {
        let limit = std::thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(4);
        let semaphore = Arc::new(Semaphore::new(limit));
        info!(games = games.len(), workers = limit, "scoring batch");

        let mut handles = Vec::with_capacity(games.len());
        for game in games {
            let engine = self.clone();
            let semaphore = semaphore.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                debug!(title = %game.metadata.game_title, reviews = game.reviews.len(), "scoring game");
                let signals = engine.analyze_game_concurrent(game.reviews).await?;
                Ok::<EnrichedGame, anyhow::Error>(EnrichedGame {
                    metadata: game.metadata,
                    signals,
                })
            }));
        }

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(handle.await??);
        }
        Ok(out)
    }
}
