//! Word corpora and deck preparation.
//!
//! A corpus is a UTF-8 text file with one word per line, most frequent first,
//! stored as `<lemmas_dir>/lemmas_<code>.txt`. A [`Deck`] is the prefix of a
//! corpus sized to fill whole pages.

use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageCode;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The size-normalized word list for one run.
///
/// Invariant: `words.len()` is a positive multiple of `page_capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    words: Vec<String>,
    page_capacity: usize,
}

impl Deck {
    /// Build a deck from an in-memory corpus.
    ///
    /// Takes the first `prepared_len(requested, page_capacity, corpus.len())`
    /// words in corpus order.
    pub fn from_corpus(mut corpus: Vec<String>, requested: usize, page_capacity: usize) -> Result<Self> {
        if page_capacity == 0 {
            return Err(FlashcardError::invalid_argument(
                "--rows/--cols",
                "page capacity must be at least 1",
            ));
        }

        let len = prepared_len(requested, page_capacity, corpus.len());
        if len == 0 {
            return Err(FlashcardError::invalid_argument(
                "--size",
                format!(
                    "cannot fill a page: {} word(s) requested, corpus has {}, one page holds {}",
                    requested,
                    corpus.len(),
                    page_capacity
                ),
            ));
        }

        corpus.truncate(len);
        Ok(Self {
            words: corpus,
            page_capacity,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    /// Number of front/back page pairs the deck fills.
    pub fn chunk_count(&self) -> usize {
        self.words.len() / self.page_capacity
    }

    /// Non-overlapping page-sized slices, in deck order.
    pub fn chunks(&self) -> std::slice::ChunksExact<'_, String> {
        self.words.chunks_exact(self.page_capacity)
    }
}

/// Number of words to use for a run.
///
/// Rounds `requested` up to whole pages, then clamps to the corpus size
/// rounded down to whole pages. The result is always a multiple of
/// `page_capacity` and never exceeds `corpus_len`.
pub fn prepared_len(requested: usize, page_capacity: usize, corpus_len: usize) -> usize {
    if page_capacity == 0 {
        return 0;
    }
    let needed = requested.div_ceil(page_capacity).saturating_mul(page_capacity);
    let available = (corpus_len / page_capacity) * page_capacity;
    needed.min(available)
}

/// Location of the corpus file for `language` under `lemmas_dir`.
pub fn corpus_path(lemmas_dir: &Path, language: &LanguageCode) -> PathBuf {
    lemmas_dir.join(format!("lemmas_{}.txt", language))
}

/// Read every word of a corpus file, in file order.
///
/// Lines are trimmed; blank lines are skipped.
pub fn read_corpus(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| FlashcardError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Load the deck for a run.
pub fn load_deck(
    lemmas_dir: &Path,
    requested: usize,
    page_capacity: usize,
    language: &LanguageCode,
) -> Result<Deck> {
    let path = corpus_path(lemmas_dir, language);
    debug!("Reading {} corpus from {}", language, path.display());

    let corpus = read_corpus(&path)?;
    let corpus_len = corpus.len();
    let deck = Deck::from_corpus(corpus, requested, page_capacity)?;

    if deck.len() < requested {
        info!(
            "Requested {} words but the {} corpus only fills {} (of {} words available)",
            requested,
            language,
            deck.len(),
            corpus_len
        );
    } else {
        info!(
            "Prepared {} {} words ({} requested, rounded up to {} page(s))",
            deck.len(),
            language,
            requested,
            deck.chunk_count()
        );
    }

    Ok(deck)
}
