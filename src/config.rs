use crate::error::{FlashcardError, Result};
use crate::render::PaperSize;
use crate::translation::{DEFAULT_GOOGLE_TRANSLATE_URL, DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL};
use std::path::PathBuf;

/// Which translation service to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorBackend {
    Google,
    OpenAi,
}

impl TranslatorBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            other => Err(FlashcardError::invalid_argument(
                "TRANSLATOR",
                format!("unknown backend '{}' (expected \"google\" or \"openai\")", other),
            )),
        }
    }
}

/// Service and rendering settings, read from the environment.
///
/// Run parameters (languages, grid size, word count) are command line flags;
/// see [`crate::cli`].
#[derive(Debug, Clone)]
pub struct Config {
    // Translation
    pub translator: TranslatorBackend,
    pub google_translate_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub translation_concurrency: usize,
    pub translation_max_attempts: u32,
    pub request_timeout_secs: u64,

    // Files
    pub lemmas_dir: PathBuf,
    pub output_dir: PathBuf,

    // Rendering
    pub paper_size: PaperSize,
    pub font_size: f32,
    pub top_offset_cm: f32,
    /// TrueType font to embed; the built-in Helvetica covers Latin scripts only
    pub font_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Translation
            translator: match std::env::var("TRANSLATOR") {
                Ok(value) => TranslatorBackend::parse(&value)?,
                Err(_) => TranslatorBackend::Google,
            },
            google_translate_url: std::env::var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TRANSLATE_URL.to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            translation_concurrency: std::env::var("TRANSLATION_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4usize)
                .max(1),
            translation_max_attempts: std::env::var("TRANSLATION_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3u32)
                .max(1),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Files
            lemmas_dir: std::env::var("LEMMAS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("lemmas")),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            // Rendering
            paper_size: match std::env::var("PAPER_SIZE") {
                Ok(value) => PaperSize::parse(&value)?,
                Err(_) => PaperSize::A4,
            },
            font_size: std::env::var("FONT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size: &f32| *size > 0.0)
                .unwrap_or(18.0),
            top_offset_cm: std::env::var("TOP_OFFSET_CM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            font_path: std::env::var("FONT_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
