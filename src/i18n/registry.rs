//! Language registry: names of common languages and the provenance of the
//! bundled word corpora.
//!
//! The registry is consulted when producing user-facing output (run banners,
//! prompts for the OpenAI translator). Any code accepted by
//! [`LanguageCode`](super::LanguageCode) can be used for a run, whether or not
//! it is listed here.

use std::sync::OnceLock;

/// Where a bundled frequency corpus came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSource {
    /// Human-readable name of the corpus provider
    pub provider: &'static str,

    /// Where the word list can be obtained
    pub url: &'static str,
}

/// Metadata for a known language.
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    /// ISO 639-1 language code (e.g., "en", "cs")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Czech")
    pub name: &'static str,

    /// Source of the bundled `lemmas_<code>.txt`, if one ships with the tool
    pub corpus: Option<CorpusSource>,
}

/// Global language registry.
///
/// Initialized once on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language by its code.
    ///
    /// Region or script suffixes are ignored, so `"zh-CN"` finds `"zh"`.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageInfo> {
        let primary = code.split('-').next().unwrap_or(code);
        self.languages.iter().find(|lang| lang.code == primary)
    }

    /// Citation line for the bundled corpus of `code`, if there is one.
    pub fn corpus_citation(&self, code: &str) -> Option<String> {
        let lang = self.get_by_code(code)?;
        let corpus = lang.corpus.as_ref()?;
        Some(format!(
            "The {} word corpus is provided by {} ({}).",
            lang.name, corpus.provider, corpus.url
        ))
    }

    /// English name for `code`, falling back to the code itself.
    pub fn display_name<'a>(&self, code: &'a str) -> &'a str {
        self.get_by_code(code).map(|lang| lang.name).unwrap_or(code)
    }
}

fn default_languages() -> Vec<LanguageInfo> {
    vec![
        LanguageInfo {
            code: "en",
            name: "English",
            corpus: Some(CorpusSource {
                provider: "wordfrequency.info",
                url: "https://www.wordfrequency.info/samples/wordFrequency.xlsx",
            }),
        },
        LanguageInfo {
            code: "cs",
            name: "Czech",
            corpus: Some(CorpusSource {
                provider: "Czech National Corpus",
                url: "https://www.korpus.cz/kontext/",
            }),
        },
        LanguageInfo {
            code: "de",
            name: "German",
            corpus: None,
        },
        LanguageInfo {
            code: "es",
            name: "Spanish",
            corpus: None,
        },
        LanguageInfo {
            code: "fr",
            name: "French",
            corpus: None,
        },
        LanguageInfo {
            code: "it",
            name: "Italian",
            corpus: None,
        },
        LanguageInfo {
            code: "pl",
            name: "Polish",
            corpus: None,
        },
        LanguageInfo {
            code: "pt",
            name: "Portuguese",
            corpus: None,
        },
        LanguageInfo {
            code: "sk",
            name: "Slovak",
            corpus: None,
        },
        LanguageInfo {
            code: "nl",
            name: "Dutch",
            corpus: None,
        },
        LanguageInfo {
            code: "sv",
            name: "Swedish",
            corpus: None,
        },
        LanguageInfo {
            code: "hu",
            name: "Hungarian",
            corpus: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_czech() {
        let lang = LanguageRegistry::get().get_by_code("cs").unwrap();
        assert_eq!(lang.name, "Czech");
        assert!(lang.corpus.is_some());
    }

    #[test]
    fn test_get_by_code_ignores_region() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.get_by_code("pt-BR").unwrap().code, "pt");
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("xx").is_none());
    }

    #[test]
    fn test_bundled_corpora_are_english_and_czech() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("en").unwrap().corpus.is_some());
        assert!(registry.get_by_code("cs").unwrap().corpus.is_some());
        assert!(registry.get_by_code("de").unwrap().corpus.is_none());
    }

    #[test]
    fn test_corpus_citation() {
        let citation = LanguageRegistry::get().corpus_citation("cs").unwrap();
        assert!(citation.contains("Czech"));
        assert!(citation.contains("korpus.cz"));

        assert!(LanguageRegistry::get().corpus_citation("de").is_none());
        assert!(LanguageRegistry::get().corpus_citation("xx").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.display_name("fr"), "French");
        assert_eq!(registry.display_name("eo"), "eo");
    }
}
