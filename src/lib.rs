//! Printable two-sided vocabulary flashcards.
//!
//! A frequency-ordered word list is cut into page-sized chunks. Each chunk
//! becomes a front page of source words and a back page of translations,
//! with every row of the back reversed so that each card's translation lands
//! behind its word when the sheet is printed double-sided and cut.

pub mod assembler;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod i18n;
pub mod layout;
pub mod render;
pub mod retry;
pub mod translation;

pub use assembler::{DocumentAssembler, FlashcardRequest, PageProgress, RunSummary};
pub use error::{FlashcardError, Result};
