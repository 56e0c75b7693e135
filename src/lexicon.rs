// src/lexicon.rs
//! Static lexicon tables: aspect triggers, polarity word lists, and the
//! difficulty hard/easy pair, plus keyword-generator options.
//!
//! The whole table is an injected, immutable value. Production code loads it
//! from `config/lexicon.toml` (override with `LEXICON_CONFIG_PATH`); tests
//! substitute minimal tables via [`Lexicon::from_toml_str`] or the builder
//! methods.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEXICON_CONFIG_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_CONFIG_PATH: &str = "LEXICON_CONFIG_PATH";

static EMBEDDED: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../config/lexicon.toml");
    Lexicon::from_toml_str(raw).expect("valid embedded lexicon config")
});

/// Closed set of scorable aspects. Keys into every count/score map, so a
/// typo'd aspect name is a compile error rather than a silent zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Graphics,
    Music,
    Difficulty,
    Story,
}

impl Aspect {
    pub const ALL: [Aspect; 4] = [
        Aspect::Graphics,
        Aspect::Music,
        Aspect::Difficulty,
        Aspect::Story,
    ];

    /// Difficulty is scored by the dedicated hard/easy lists; every other
    /// aspect (story included) uses the shared positive/negative lists.
    pub fn is_difficulty(self) -> bool {
        matches!(self, Aspect::Difficulty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Aspect::Graphics => "graphics",
            Aspect::Music => "music",
            Aspect::Difficulty => "difficulty",
            Aspect::Story => "story",
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-generator options (`[keywords]` table).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeywordParams {
    /// Fraction of the candidate vocabulary to retain, in percent.
    pub top_percent: f64,
    /// Rounding precision for retained weights.
    pub decimal_places: u32,
    /// Reserved for sentence-window scoring; currently unused.
    pub window_size: usize,
}

impl Default for KeywordParams {
    fn default() -> Self {
        Self {
            top_percent: 25.0,
            decimal_places: 2,
            window_size: 5,
        }
    }
}

/// Full lexicon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    /// Aspect → trigger expressions, matched as substrings of raw sentences.
    pub triggers: BTreeMap<Aspect, Vec<String>>,
    /// Shared polarity lists, matched against base-form tokens.
    pub positive: HashSet<String>,
    pub negative: HashSet<String>,
    /// Difficulty-only lists. Mutually exclusive from positive/negative:
    /// generic sentiment tokens are ignored inside difficulty sentences.
    pub hard: HashSet<String>,
    pub easy: HashSet<String>,
    #[serde(default)]
    pub keywords: KeywordParams,
}

impl Lexicon {
    /// Parse from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let lex: Lexicon = toml::from_str(toml_str)?;
        Ok(lex)
    }

    /// Load from `LEXICON_CONFIG_PATH` or `config/lexicon.toml`.
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_LEXICON_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH));
        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon config at {}: {}", path.display(), e)
        })?;
        Self::from_toml_str(&content)
    }

    /// The table bundled with the crate.
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    /// Trigger expressions for one aspect (empty slice when unconfigured).
    pub fn triggers_for(&self, aspect: Aspect) -> &[String] {
        self.triggers
            .get(&aspect)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
