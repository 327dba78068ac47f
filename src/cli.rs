//! Command line arguments shared by the binaries.

use crate::assembler::FlashcardRequest;
use crate::error::Result;
use crate::i18n::LanguageCode;
use clap::{Args, Parser};

/// Run parameters: languages, grid size and word count.
///
/// Integer flags are parsed by clap, so a non-numeric value stops the program
/// with a diagnostic naming the flag before any file is read.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Language you are learning (translation target)
    #[arg(short = 't', long, env = "TARGET_LANGUAGE", default_value = "en")]
    pub target: String,

    /// Language you know; `lemmas/lemmas_<code>.txt` must exist
    #[arg(short = 's', long, env = "SOURCE_LANGUAGE", default_value = "cs")]
    pub source: String,

    /// Cards per column of a page
    #[arg(short = 'r', long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,

    /// Cards per row of a page
    #[arg(short = 'c', long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: u32,

    /// Number of words; rounded up to fill whole pages
    #[arg(short = 'n', long, default_value_t = 250, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,
}

impl RunArgs {
    pub fn request(&self) -> Result<FlashcardRequest> {
        Ok(FlashcardRequest {
            source: LanguageCode::parse("--source", &self.source)?,
            target: LanguageCode::parse("--target", &self.target)?,
            rows: self.rows as usize,
            cols: self.cols as usize,
            size: self.size as usize,
        })
    }
}

/// Generate printable two-sided vocabulary flashcards.
///
/// Front pages carry source-language words with cut lines; each is followed
/// by a back page with the translations, mirrored for duplex printing.
#[derive(Debug, Parser)]
#[command(name = "lemma-flashcards", version)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
}
