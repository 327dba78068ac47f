//! Word translation.
//!
//! [`Translator`] is the seam between the layout engine and whatever service
//! produces translations. Backends:
//!
//! - [`GoogleTranslator`]: the public `translate_a/single` endpoint (default)
//! - [`OpenAiTranslator`]: chat completions, one word per request
//! - [`IdentityTranslator`]: returns words unchanged (same source and target,
//!   offline previews, tests)

mod google;
mod openai;

pub use google::{GoogleTranslator, DEFAULT_GOOGLE_TRANSLATE_URL};
pub use openai::{OpenAiTranslator, DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL};

use crate::config::{Config, TranslatorBackend};
use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageCode;
use crate::retry::RetryConfig;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::fmt;
use std::sync::Arc;

/// Maps a single word from one language to another.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `word` from `source` to `target`.
    ///
    /// Failures are reported as [`FlashcardError::TranslationFailure`] naming
    /// the word.
    async fn translate(&self, word: &str, source: &LanguageCode, target: &LanguageCode) -> Result<String>;
}

/// Returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate(&self, word: &str, _source: &LanguageCode, _target: &LanguageCode) -> Result<String> {
        Ok(word.to_string())
    }
}

/// Translate `words` with at most `concurrency` calls in flight.
///
/// The output has the same length and order as `words`, regardless of the
/// order in which calls complete. The first failure aborts the chunk.
pub async fn translate_words(
    translator: &dyn Translator,
    words: &[String],
    source: &LanguageCode,
    target: &LanguageCode,
    concurrency: usize,
) -> Result<Vec<String>> {
    stream::iter(words.iter().map(|word| translator.translate(word, source, target)))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Pick the translator for a run.
///
/// Same source and target means nothing needs translating.
pub fn translator_from_config(
    config: &Config,
    client: reqwest::Client,
    source: &LanguageCode,
    target: &LanguageCode,
) -> Result<Arc<dyn Translator>> {
    if source == target {
        return Ok(Arc::new(IdentityTranslator));
    }

    let retry = RetryConfig::translation(config.translation_max_attempts);
    match config.translator {
        TranslatorBackend::Google => Ok(Arc::new(GoogleTranslator::new(
            client,
            config.google_translate_url.clone(),
            retry,
        ))),
        TranslatorBackend::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                FlashcardError::invalid_argument("OPENAI_API_KEY", "required when TRANSLATOR=openai")
            })?;
            Ok(Arc::new(OpenAiTranslator::new(
                client,
                api_key,
                config.openai_model.clone(),
                config.openai_api_url.clone(),
                retry,
            )))
        }
    }
}

/// Why a single HTTP translation attempt failed.
#[derive(Debug)]
pub(crate) enum AttemptError {
    /// Connection failure, timeout or unreadable body
    Transport(reqwest::Error),
    /// Non-success HTTP status
    Status(reqwest::StatusCode, String),
    /// The service answered but the payload had no usable translation
    Malformed(String),
}

impl AttemptError {
    /// Network errors, timeouts, 429 and 5xx are worth another attempt;
    /// other 4xx and malformed payloads are not.
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            AttemptError::Transport(_) => true,
            AttemptError::Status(status, _) => {
                *status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            AttemptError::Malformed(_) => false,
        }
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Transport(e) => write!(f, "request failed: {}", e),
            AttemptError::Status(status, body) => write!(f, "HTTP {}: {}", status, body),
            AttemptError::Malformed(reason) => write!(f, "unexpected response: {}", reason),
        }
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        AttemptError::Transport(e)
    }
}

/// Turn a non-success response into [`AttemptError::Status`].
pub(crate) async fn check_status(response: reqwest::Response) -> std::result::Result<reqwest::Response, AttemptError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
    Err(AttemptError::Status(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse("--test", s).unwrap()
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Uppercases words, finishing later for earlier words.
    struct SlowUppercase {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Translator for SlowUppercase {
        async fn translate(&self, word: &str, _: &LanguageCode, _: &LanguageCode) -> Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let delay = 40u64.saturating_sub(word.len() as u64 * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(word.to_uppercase())
        }
    }

    struct FailOn(&'static str);

    #[async_trait]
    impl Translator for FailOn {
        async fn translate(&self, word: &str, _: &LanguageCode, _: &LanguageCode) -> Result<String> {
            if word == self.0 {
                Err(FlashcardError::translation(word, "service unavailable"))
            } else {
                Ok(word.to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_identity_translator() {
        let out = IdentityTranslator.translate("pes", &code("cs"), &code("en")).await.unwrap();
        assert_eq!(out, "pes");
    }

    #[tokio::test]
    async fn test_translate_words_preserves_order_under_concurrency() {
        let translator = SlowUppercase {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let input = words(&["a", "bb", "ccc", "dddd"]);

        let out = translate_words(&translator, &input, &code("cs"), &code("en"), 4)
            .await
            .unwrap();

        assert_eq!(out, words(&["A", "BB", "CCC", "DDDD"]));
        assert!(translator.peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_translate_words_respects_concurrency_limit() {
        let translator = SlowUppercase {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let input = words(&["a", "b", "c", "d", "e", "f"]);

        translate_words(&translator, &input, &code("cs"), &code("en"), 2)
            .await
            .unwrap();

        assert!(translator.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_translate_words_zero_concurrency_still_runs() {
        let out = translate_words(&IdentityTranslator, &words(&["x"]), &code("cs"), &code("en"), 0)
            .await
            .unwrap();
        assert_eq!(out, words(&["x"]));
    }

    #[tokio::test]
    async fn test_translate_words_failure_names_word() {
        let err = translate_words(&FailOn("c"), &words(&["a", "b", "c", "d"]), &code("cs"), &code("en"), 2)
            .await
            .unwrap_err();

        match err {
            FlashcardError::TranslationFailure { word, .. } => assert_eq!(word, "c"),
            other => panic!("expected TranslationFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_attempt_error_retryability() {
        use reqwest::StatusCode;

        assert!(AttemptError::Status(StatusCode::TOO_MANY_REQUESTS, String::new()).is_retryable());
        assert!(AttemptError::Status(StatusCode::BAD_GATEWAY, String::new()).is_retryable());
        assert!(!AttemptError::Status(StatusCode::BAD_REQUEST, String::new()).is_retryable());
        assert!(!AttemptError::Status(StatusCode::UNAUTHORIZED, String::new()).is_retryable());
        assert!(!AttemptError::Malformed("empty".to_string()).is_retryable());
    }

    #[test]
    fn test_attempt_error_display_includes_status() {
        let err = AttemptError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE, "down".to_string());
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("down"));
    }
}
