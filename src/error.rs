//! Error taxonomy for flashcard generation.
//!
//! Library functions return [`FlashcardError`]; the binaries wrap it in
//! `anyhow` at the edge. Every variant is fatal for a run: nothing is written
//! to disk unless the whole document could be built.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlashcardError>;

#[derive(Debug, Error)]
pub enum FlashcardError {
    /// The corpus file for the requested language could not be read.
    #[error("word corpus unavailable: cannot read {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A command line flag or configuration value is unusable.
    #[error("invalid value for {flag}: {reason}")]
    InvalidArgument { flag: String, reason: String },

    /// Translating a word failed (after any retries).
    #[error("failed to translate '{word}': {reason}")]
    TranslationFailure { word: String, reason: String },

    /// The configured TrueType font could not be loaded.
    #[error("cannot use font {}: {reason}", path.display())]
    FontUnavailable { path: PathBuf, reason: String },

    /// A word contains a character the page font cannot show.
    #[error("cannot print '{word}': font {font} has no glyph for '{character}' (set FONT_PATH to a TrueType font that covers it)")]
    UnprintableText {
        word: String,
        character: char,
        font: String,
    },

    /// The PDF document could not be assembled.
    #[error("failed to render document: {0}")]
    Render(String),

    /// The finished document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FlashcardError {
    pub fn invalid_argument(flag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            flag: flag.into(),
            reason: reason.into(),
        }
    }

    pub fn translation(word: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::TranslationFailure {
            word: word.into(),
            reason: reason.to_string(),
        }
    }
}
