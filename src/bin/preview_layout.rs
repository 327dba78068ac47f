//! Preview binary - prints the front/back grids as text instead of writing a PDF
//!
//! Usage:
//!   cargo run --bin preview                          # First page pair, translated
//!   cargo run --bin preview -- --no-translate        # Show layout without calling a translator
//!   cargo run --bin preview -- -r 3 -c 3 --pages 2   # Smaller grid, two page pairs
//!
//! Uses the same environment configuration as the main binary (TRANSLATOR,
//! LEMMAS_DIR, ...).

use anyhow::{Context, Result};
use clap::Parser;
use lemma_flashcards::cli::RunArgs;
use lemma_flashcards::config::Config;
use lemma_flashcards::corpus::load_deck;
use lemma_flashcards::layout::{Grid, PageGeometry, PageLayoutEngine};
use lemma_flashcards::translation::{translator_from_config, IdentityTranslator, Translator};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Print flashcard page layouts to the terminal.
#[derive(Debug, Parser)]
#[command(name = "preview", version)]
struct PreviewCli {
    #[command(flatten)]
    run: RunArgs,

    /// Show source words on both sides instead of translating
    #[arg(long)]
    no_translate: bool,

    /// Number of page pairs to show
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Render a grid as a boxed text table.
fn format_grid(grid: &Grid) -> String {
    let width = grid
        .rows()
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);

    let separator = format!(
        "+{}+",
        vec!["-".repeat(width + 2); grid.col_count()].join("+")
    );

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    for row in grid.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| format!(" {:<width$} ", cell, width = width))
            .collect();
        out.push_str(&format!("|{}|\n", cells.join("|")));
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = PreviewCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lemma_flashcards=info".parse()?),
        )
        .init();

    let request = cli.run.request()?;
    let config = Config::from_env()?;

    let translator: Arc<dyn Translator> = if cli.no_translate {
        Arc::new(IdentityTranslator)
    } else {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        translator_from_config(&config, client, &request.source, &request.target)?
    };

    let geometry = PageGeometry::new(request.rows, request.cols)?;
    let deck = load_deck(&config.lemmas_dir, request.size, geometry.capacity(), &request.source)?;
    let engine = PageLayoutEngine::new(geometry, translator.as_ref(), &request.source, &request.target)
        .with_concurrency(config.translation_concurrency);

    let shown = deck.chunk_count().min(cli.pages as usize);
    info!("Showing {} of {} page pair(s)", shown, deck.chunk_count());

    for (index, chunk) in deck.chunks().take(shown).enumerate() {
        let pair = engine.layout_chunk(index, chunk).await?;

        println!("Page {} (front, {}):", index * 2 + 1, request.source);
        println!("{}", format_grid(&pair.front));
        println!("Page {} (back, {}, mirrored):", index * 2 + 2, request.target);
        println!("{}", format_grid(&pair.back));
    }

    Ok(())
}
