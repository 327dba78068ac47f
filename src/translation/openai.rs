use super::{check_status, AttemptError, Translator};
use crate::error::{FlashcardError, Result};
use crate::i18n::LanguageCode;
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// A dictionary answer is a word or two
const MAX_REPLY_TOKENS: u32 = 16;

/// Chat completion request for one word
#[derive(Debug, Serialize)]
struct LookupRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

fn build_system_prompt(source: &LanguageCode, target: &LanguageCode) -> String {
    format!(
        "You are a bilingual dictionary for vocabulary flashcards. \
         Translate the given {} word into {}. \
         Reply with the most common translation only: no explanations, \
         no alternatives, no quotation marks, no trailing punctuation.",
        source.name(),
        target.name()
    )
}

/// Strip whitespace, wrapping quotes and a trailing period from a model reply
fn clean_reply(reply: &str) -> String {
    reply
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”' | '„' | '«' | '»'))
        .trim_end_matches('.')
        .trim()
        .to_string()
}

/// Translator backed by an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
    retry: RetryConfig,
}

impl OpenAiTranslator {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_url: impl Into<String>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_url: api_url.into(),
            retry,
        }
    }

    fn build_request(&self, word: &str, source: &LanguageCode, target: &LanguageCode) -> LookupRequest {
        LookupRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_system_prompt(source, target),
                },
                Message {
                    role: "user".to_string(),
                    content: word.to_string(),
                },
            ],
            max_tokens: MAX_REPLY_TOKENS,
            temperature: 0.0,
        }
    }

    async fn request(&self, request: &LookupRequest) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let chat_response: ChatResponse = check_status(response).await?.json().await?;

        let reply = chat_response
            .choices
            .first()
            .map(|c| clean_reply(&c.message.content))
            .ok_or_else(|| AttemptError::Malformed("response contained no choices".to_string()))?;

        if reply.is_empty() {
            return Err(AttemptError::Malformed("empty translation".to_string()));
        }
        Ok(reply)
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, word: &str, source: &LanguageCode, target: &LanguageCode) -> Result<String> {
        let request = self.build_request(word, source, target);

        let translated = with_retry_if(
            &self.retry,
            &format!("Translating '{}' with {}", word, self.model),
            || self.request(&request),
            AttemptError::is_retryable,
        )
        .await
        .map_err(|e| FlashcardError::translation(word, e))?;

        debug!("{} -> {}", word, translated);
        Ok(translated)
    }
}
