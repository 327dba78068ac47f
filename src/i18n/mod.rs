//! Language handling.
//!
//! - `language`: validated [`LanguageCode`] used for corpus lookup and translation
//! - `registry`: static table of language names and bundled corpus citations

mod language;
mod registry;

pub use language::LanguageCode;
pub use registry::{CorpusSource, LanguageInfo, LanguageRegistry};
