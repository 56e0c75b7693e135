// src/stopwords.rs
//! Process-wide stopword list: tokens the normalizer always discards.
//!
//! The set is an explicit value handed to the tokenizer, not a global.
//! Loading is deliberately forgiving: a missing or malformed file degrades
//! to an empty set (nothing excluded) with a logged warning, because a lost
//! stopword list must never take the whole scoring pipeline down.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::warn;

pub const DEFAULT_STOPWORDS_PATH: &str = "stopwords.json";
pub const ENV_STOPWORDS_PATH: &str = "STOPWORDS_PATH";

static EMBEDDED: Lazy<HashSet<String>> = Lazy::new(|| {
    let raw = include_str!("../stopwords.json");
    serde_json::from_str::<HashSet<String>>(raw).expect("valid embedded stopword list")
});

/// Immutable stopword set.
#[derive(Debug, Clone, Default)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    /// Empty set: no tokens excluded.
    pub fn empty() -> Self {
        Self(HashSet::new())
    }

    /// The list bundled with the crate.
    pub fn embedded() -> Self {
        Self(EMBEDDED.clone())
    }

    /// Build from explicit words (tests, custom deployments).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }

    /// Load a JSON array of words from `path`. Any failure degrades to an
    /// empty set and logs a warning.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<HashSet<String>>(&raw) {
                Ok(set) => Self(set),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "stopword list unparseable; continuing with empty set");
                    Self::empty()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "stopword list unreadable; continuing with empty set");
                Self::empty()
            }
        }
    }

    /// Resolve via `STOPWORDS_PATH`, falling back to `stopwords.json`,
    /// falling back to the embedded list if neither file exists.
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var(ENV_STOPWORDS_PATH) {
            return Self::load(path);
        }
        if Path::new(DEFAULT_STOPWORDS_PATH).exists() {
            return Self::load(DEFAULT_STOPWORDS_PATH);
        }
        Self::embedded()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
