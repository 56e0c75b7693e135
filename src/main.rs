//! Review Scoring Driver — Binary Entrypoint
//! Reads a JSON file of games with pre-fetched reviews, runs the scoring
//! engine over all of them on a bounded worker pool, and writes enriched
//! records back out. All network I/O happens upstream of this tool.
//!
//! Usage: game-review-analyzer <games.json> [out.json]

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use game_review_analyzer::{Engine, GameCorpus};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("game_review_analyzer=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .context("usage: game-review-analyzer <games.json> [out.json]")?;
    let output = args.next().unwrap_or_else(|| "enriched_games.json".into());

    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read input corpus at {input}"))?;
    let games: Vec<GameCorpus> =
        serde_json::from_str(&raw).with_context(|| format!("invalid games JSON in {input}"))?;
    info!(games = games.len(), input = %input, "loaded review corpora");

    let engine = Engine::with_defaults()?;
    let enriched = engine.analyze_batch(games).await?;

    let json = serde_json::to_string_pretty(&enriched)?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write results to {output}"))?;
    info!(games = enriched.len(), output = %output, "wrote enriched records");

    Ok(())
}
