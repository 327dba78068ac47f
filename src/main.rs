use anyhow::{Context, Result};
use clap::Parser;
use lemma_flashcards::cli::Cli;
use lemma_flashcards::config::Config;
use lemma_flashcards::i18n::LanguageRegistry;
use lemma_flashcards::translation::translator_from_config;
use lemma_flashcards::DocumentAssembler;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file before parsing so flag env fallbacks see it
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lemma_flashcards=info".parse()?),
        )
        .init();

    let request = cli.run.request()?;
    let config = Config::from_env()?;

    if let Some(citation) = LanguageRegistry::get().corpus_citation(request.source.as_str()) {
        info!("{}", citation);
    }
    info!(
        "Generating {} -> {} flashcards: {} words, {}x{} cards per page",
        request.source.name(),
        request.target.name(),
        request.size,
        request.rows,
        request.cols
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    let translator = translator_from_config(&config, client, &request.source, &request.target)?;

    let summary = DocumentAssembler::from_config(&config, translator.as_ref())
        .run(&request, |progress| {
            info!("Working on page {} of {}...", progress.page, progress.total);
        })
        .await?;

    info!(
        "Done: {} words on {} pages in {}",
        summary.words,
        summary.pages,
        summary.output_path.display()
    );
    Ok(())
}
