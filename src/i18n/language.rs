//! Validated language codes.
//!
//! Translation services and corpus file names are keyed by ISO 639 codes,
//! optionally followed by a region (`zh-CN`) or script (`sr-Latn`) subtag.

use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageRegistry;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-([A-Z]{2}|[A-Z][a-z]{3}))?$").expect("Invalid language code regex")
    })
}

/// A syntactically valid language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse a language code supplied through `flag`.
    ///
    /// Leading/trailing whitespace is ignored and the primary subtag is
    /// lowercased, so `" EN "` parses as `en`.
    pub fn parse(flag: &str, value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let normalized = match trimmed.split_once('-') {
            Some((primary, rest)) => format!("{}-{}", primary.to_ascii_lowercase(), rest),
            None => trimmed.to_ascii_lowercase(),
        };

        if !code_regex().is_match(&normalized) {
            return Err(FlashcardError::invalid_argument(
                flag,
                format!("'{}' is not a language code (expected e.g. \"en\" or \"zh-CN\")", value),
            ));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English name of the language, or the code when it is not in the registry.
    pub fn name(&self) -> &str {
        LanguageRegistry::get().display_name(&self.0)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
