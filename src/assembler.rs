//! Document assembly: corpus -> layout -> rendered pages -> PDF file.

use crate::config::Config;
use crate::corpus::load_deck;
use crate::error::Result;
use crate::i18n::LanguageCode;
use crate::layout::{PageGeometry, PageLayoutEngine};
use crate::render::{PageStyle, PdfRenderer, RenderSettings, TrueTypeFont, CM};
use crate::translation::Translator;
use std::path::PathBuf;
use tracing::{debug, info};

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardRequest {
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub rows: usize,
    pub cols: usize,
    /// Requested number of words before rounding to whole pages
    pub size: usize,
}

/// Reported after each page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based number of the page just rendered
    pub page: usize,
    pub total: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub pages: usize,
    pub words: usize,
}

/// `<source>_<target>_flashcard.pdf`
pub fn output_file_name(source: &LanguageCode, target: &LanguageCode) -> String {
    format!("{}_{}_flashcard.pdf", source, target)
}

/// Drives one flashcard run.
pub struct DocumentAssembler<'a> {
    translator: &'a dyn Translator,
    lemmas_dir: PathBuf,
    output_dir: PathBuf,
    render: RenderSettings,
    font_path: Option<PathBuf>,
    concurrency: usize,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(translator: &'a dyn Translator, lemmas_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            translator,
            lemmas_dir: lemmas_dir.into(),
            output_dir: output_dir.into(),
            render: RenderSettings::default(),
            font_path: None,
            concurrency: 1,
        }
    }

    pub fn from_config(config: &Config, translator: &'a dyn Translator) -> Self {
        Self::new(translator, &config.lemmas_dir, &config.output_dir)
            .with_render_settings(RenderSettings {
                paper: config.paper_size,
                font_size: config.font_size,
                top_offset: config.top_offset_cm * CM,
            })
            .with_font(config.font_path.clone())
            .with_concurrency(config.translation_concurrency)
    }

    pub fn with_render_settings(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }

    /// Embed the TrueType font at `path` instead of using the built-in font.
    pub fn with_font(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Generate the document for `request` and write it to the output directory.
    ///
    /// `progress` is called once per rendered page. The file is only written
    /// once every page has been built; any failure, including a word the
    /// font cannot show, leaves no output behind.
    pub async fn run<F>(&self, request: &FlashcardRequest, mut progress: F) -> Result<RunSummary>
    where
        F: FnMut(PageProgress),
    {
        let geometry = PageGeometry::new(request.rows, request.cols)?;
        let deck = load_deck(&self.lemmas_dir, request.size, geometry.capacity(), &request.source)?;

        let engine = PageLayoutEngine::new(geometry, self.translator, &request.source, &request.target)
            .with_concurrency(self.concurrency);
        engine.check_deck(&deck)?;

        let total = deck.chunk_count() * 2;
        let mut renderer = match &self.font_path {
            Some(path) => PdfRenderer::with_font(self.render, TrueTypeFont::load(path)?),
            None => PdfRenderer::new(self.render),
        };
        let mut page = 0;

        for (index, chunk) in deck.chunks().enumerate() {
            debug!("Laying out chunk {} of {}", index + 1, deck.chunk_count());
            let pair = engine.layout_chunk(index, chunk).await?;

            renderer.render(&pair.front, PageStyle::Bordered)?;
            page += 1;
            progress(PageProgress { page, total });

            renderer.render(&pair.back, PageStyle::Borderless)?;
            page += 1;
            progress(PageProgress { page, total });
        }

        let output_path = self
            .output_dir
            .join(output_file_name(&request.source, &request.target));
        renderer.save(&output_path)?;
        info!("Wrote {} pages to {}", page, output_path.display());

        Ok(RunSummary {
            output_path,
            pages: page,
            words: deck.len(),
        })
    }
}
