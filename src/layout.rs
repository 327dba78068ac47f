//! Page layout: turns a deck into front/back grid pairs.
//!
//! Each page-sized chunk of the deck becomes one front grid (source words,
//! row-major) and one back grid (translations, each row reversed). When the
//! printed sheet is turned over about its vertical axis, the back's column
//! `cols - 1 - c` lands behind the front's column `c`, so every card's
//! translation ends up behind its word:
//!
//! ```text
//!   front          back (as printed)
//! ┌───┬───┐        ┌───┬───┐
//! │ a │ b │        │ B │ A │
//! ├───┼───┤        ├───┼───┤
//! │ c │ d │        │ D │ C │
//! └───┴───┘        └───┴───┘
//! ```

use crate::corpus::Deck;
use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageCode;
use crate::translation::{translate_words, Translator};

/// Grid dimensions of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    rows: usize,
    cols: usize,
}

impl PageGeometry {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(FlashcardError::invalid_argument("--rows", "must be at least 1"));
        }
        if cols == 0 {
            return Err(FlashcardError::invalid_argument("--cols", "must be at least 1"));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cards per page.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

/// A rows × cols matrix of cell text for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Lay out `words` row-major: cell (r, c) is `words[r * cols + c]`.
    ///
    /// `words.len()` must equal the geometry's capacity.
    pub fn row_major(words: &[String], geometry: PageGeometry) -> Result<Self> {
        if words.len() != geometry.capacity() {
            return Err(FlashcardError::Render(format!(
                "chunk has {} words, page holds {}",
                words.len(),
                geometry.capacity()
            )));
        }

        let cells = words
            .chunks_exact(geometry.cols())
            .map(|row| row.to_vec())
            .collect();
        Ok(Self { cells })
    }

    /// The same grid with every row reversed.
    pub fn mirrored(&self) -> Self {
        Self {
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().rev().cloned().collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn col_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }
}

/// The two sides of one printed sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePair {
    /// Position of the chunk within the deck
    pub index: usize,
    /// Source words, row-major
    pub front: Grid,
    /// Translations, rows reversed
    pub back: Grid,
}

/// Build the page pair for one chunk from its words and their translations.
///
/// `translations[i]` must be the translation of `chunk[i]`. The back grid is
/// laid out with the same row-major indexing as the front, then mirrored.
pub fn pair_chunk(
    index: usize,
    chunk: &[String],
    translations: &[String],
    geometry: PageGeometry,
) -> Result<PagePair> {
    if chunk.len() != translations.len() {
        return Err(FlashcardError::Render(format!(
            "chunk {} has {} words but {} translations",
            index,
            chunk.len(),
            translations.len()
        )));
    }

    let front = Grid::row_major(chunk, geometry)?;
    let back = Grid::row_major(translations, geometry)?.mirrored();
    Ok(PagePair { index, front, back })
}

/// Maps a deck onto page pairs, translating each chunk as it goes.
pub struct PageLayoutEngine<'a> {
    geometry: PageGeometry,
    translator: &'a dyn Translator,
    source: &'a LanguageCode,
    target: &'a LanguageCode,
    concurrency: usize,
}

impl<'a> PageLayoutEngine<'a> {
    pub fn new(
        geometry: PageGeometry,
        translator: &'a dyn Translator,
        source: &'a LanguageCode,
        target: &'a LanguageCode,
    ) -> Self {
        Self {
            geometry,
            translator,
            source,
            target,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` translation calls in flight per chunk.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Lay out chunk `index` of a deck.
    pub async fn layout_chunk(&self, index: usize, chunk: &[String]) -> Result<PagePair> {
        let translations = translate_words(
            self.translator,
            chunk,
            self.source,
            self.target,
            self.concurrency,
        )
        .await?;
        pair_chunk(index, chunk, &translations, self.geometry)
    }

    /// The deck must have been prepared for this page size.
    pub fn check_deck(&self, deck: &Deck) -> Result<()> {
        if deck.page_capacity() != self.geometry.capacity() {
            return Err(FlashcardError::Render(format!(
                "deck prepared for {} cards per page, layout has {}",
                deck.page_capacity(),
                self.geometry.capacity()
            )));
        }
        Ok(())
    }
}
