use super::{check_status, AttemptError, Translator};
use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageCode;
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Default endpoint of the public Google Translate API used by browser widgets.
pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translator backed by Google Translate's `translate_a/single` endpoint.
///
/// No API key is needed. Language codes are passed through unchanged.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    url: String,
    retry: RetryConfig,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client, url: impl Into<String>, retry: RetryConfig) -> Self {
        Self {
            client,
            url: url.into(),
            retry,
        }
    }

    async fn request(
        &self,
        word: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", word),
            ])
            .send()
            .await?;

        let body: Value = check_status(response).await?.json().await?;
        parse_translation(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, word: &str, source: &LanguageCode, target: &LanguageCode) -> Result<String> {
        let translated = with_retry_if(
            &self.retry,
            &format!("Translating '{}' ({} -> {})", word, source, target),
            || self.request(word, source, target),
            AttemptError::is_retryable,
        )
        .await
        .map_err(|e| FlashcardError::translation(word, e))?;

        debug!("{} -> {}", word, translated);
        Ok(translated)
    }
}

/// Extract the translation from a `translate_a/single` response.
///
/// The payload is a nested array; element `[0]` lists sentence segments, each
/// of which starts with the translated text. Segments are concatenated.
fn parse_translation(body: &Value) -> std::result::Result<String, AttemptError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| AttemptError::Malformed("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    let text = text.trim();
    if text.is_empty() {
        return Err(AttemptError::Malformed("empty translation".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse("--test", s).unwrap()
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig::new(3, Duration::from_millis(5))
    }

    fn translator(server: &MockServer) -> GoogleTranslator {
        GoogleTranslator::new(
            reqwest::Client::new(),
            format!("{}/translate_a/single", server.uri()),
            fast_retry(),
        )
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_single_segment() {
        let body = json!([[["dog", "pes", null, null, 10]], null, "cs"]);
        assert_eq!(parse_translation(&body).unwrap(), "dog");
    }

    #[test]
    fn test_parse_multiple_segments_are_concatenated() {
        let body = json!([[["good ", "dobrý ", null], ["day", "den", null]], null, "cs"]);
        assert_eq!(parse_translation(&body).unwrap(), "good day");
    }

    #[test]
    fn test_parse_empty_translation_is_malformed() {
        let body = json!([[["", "x", null]], null, "cs"]);
        assert!(matches!(parse_translation(&body), Err(AttemptError::Malformed(_))));
    }

    #[test]
    fn test_parse_missing_segments_is_malformed() {
        assert!(parse_translation(&json!({"error": "nope"})).is_err());
        assert!(parse_translation(&json!([null])).is_err());
    }

    // ==================== HTTP Tests ====================

    #[tokio::test]
    async fn test_translate_sends_language_codes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "cs"))
            .and(query_param("tl", "en"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "pes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["dog", "pes"]], null, "cs"])))
            .expect(1)
            .mount(&server)
            .await;

        let out = translator(&server)
            .translate("pes", &code("cs"), &code("en"))
            .await
            .unwrap();
        assert_eq!(out, "dog");
    }

    #[tokio::test]
    async fn test_translate_retries_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["house", "dům"]]])))
            .mount(&server)
            .await;

        let out = translator(&server)
            .translate("dům", &code("cs"), &code("en"))
            .await
            .unwrap();
        assert_eq!(out, "house");
    }

    #[tokio::test]
    async fn test_translate_client_error_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad language"))
            .expect(1)
            .mount(&server)
            .await;

        let err = translator(&server)
            .translate("pes", &code("cs"), &code("xx"))
            .await
            .unwrap_err();

        match err {
            FlashcardError::TranslationFailure { word, reason } => {
                assert_eq!(word, "pes");
                assert!(reason.contains("400"));
            }
            other => panic!("expected TranslationFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_gives_up_after_max_attempts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let result = translator(&server).translate("pes", &code("cs"), &code("en")).await;
        assert!(result.is_err());
    }
}
