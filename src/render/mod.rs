//! PDF rendering of flashcard grids.
//!
//! Each grid becomes one page that the grid fills edge to edge. Cells are
//! `width / cols` by `height / rows` points; there are no margins.
//!
//! Text is set in the built-in Helvetica unless a TrueType font is given.
//! A word the font cannot show fails the page; nothing is substituted.

mod encoding;
mod metrics;
mod truetype;

pub use encoding::{EncodedText, GlyphEncoding, BUILTIN_FONT};
pub use truetype::TrueTypeFont;

use crate::error::{FlashcardError, Result};
use crate::layout::Grid;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

/// Points per centimetre.
pub const CM: f32 = 72.0 / 2.54;

/// Line height as a multiple of font size.
const LEADING: f32 = 1.2;

/// Words of a multi-word cell are separated by one blank line.
const LINES_PER_WORD: f32 = 2.0;

/// Inner padding of a cell, in points.
const CELL_PADDING: f32 = 6.0;

/// Distance from a line's vertical centre down to its baseline, in em.
const BASELINE_DROP: f32 = 0.35;

const GRID_LINE_WIDTH: f32 = 1.0;

/// Physical paper format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            other => Err(FlashcardError::invalid_argument(
                "PAPER_SIZE",
                format!("unknown paper size '{}' (expected \"a4\" or \"letter\")", other),
            )),
        }
    }

    /// Width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.2756, 841.8898),
            PaperSize::Letter => (612.0, 792.0),
        }
    }
}

/// How cell borders are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Black cut lines (front pages)
    Bordered,
    /// Lines in the page colour (back pages)
    Borderless,
}

impl PageStyle {
    /// RGB stroke colour of the grid lines.
    fn stroke_rgb(&self) -> [f32; 3] {
        match self {
            PageStyle::Bordered => [0.0, 0.0, 0.0],
            PageStyle::Borderless => [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub paper: PaperSize,
    /// Largest font size in points; long words are set smaller to fit
    pub font_size: f32,
    /// How far the grid is raised above the top edge of the page, in points
    pub top_offset: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            font_size: 18.0,
            top_offset: 0.0,
        }
    }
}

/// The font cell text is set in.
enum PageFont {
    Builtin(GlyphEncoding),
    Embedded(TrueTypeFont),
}

impl PageFont {
    fn encode(&mut self, word: &str) -> Result<EncodedText> {
        match self {
            PageFont::Builtin(encoding) => encoding.encode(word),
            PageFont::Embedded(font) => font.encode(word),
        }
    }

    fn show(&self, text: EncodedText) -> Object {
        match self {
            PageFont::Builtin(_) => Object::String(text.bytes, StringFormat::Literal),
            PageFont::Embedded(_) => Object::String(text.bytes, StringFormat::Hexadecimal),
        }
    }

    fn font_dictionary(&self, doc: &mut Document) -> Dictionary {
        match self {
            PageFont::Builtin(encoding) => builtin_font_dictionary(encoding),
            PageFont::Embedded(font) => font.font_dictionary(doc),
        }
    }
}

/// Helvetica with WinAnsi plus the extra Latin glyphs that were used.
fn builtin_font_dictionary(encoding: &GlyphEncoding) -> Dictionary {
    let mut differences = vec![Object::Integer(i64::from(encoding.first_extra_code()))];
    differences.extend(
        encoding
            .differences()
            .map(|name| Object::Name(name.as_bytes().to_vec())),
    );

    Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(BUILTIN_FONT.as_bytes().to_vec())),
        (
            "Encoding",
            Object::Dictionary(Dictionary::from_iter([
                ("Type", Object::Name(b"Encoding".to_vec())),
                ("BaseEncoding", Object::Name(b"WinAnsiEncoding".to_vec())),
                ("Differences", Object::Array(differences)),
            ])),
        ),
    ])
}

/// Builds a PDF document one grid page at a time.
///
/// Nothing touches the filesystem until [`PdfRenderer::save`].
pub struct PdfRenderer {
    settings: RenderSettings,
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font: PageFont,
}

impl PdfRenderer {
    /// Renderer using the built-in Helvetica (Latin scripts only).
    pub fn new(settings: RenderSettings) -> Self {
        Self::with_page_font(settings, PageFont::Builtin(GlyphEncoding::new()))
    }

    /// Renderer that embeds `font` and sets all text in it.
    pub fn with_font(settings: RenderSettings, font: TrueTypeFont) -> Self {
        debug!("Setting text in embedded font {}", font.name());
        Self::with_page_font(settings, PageFont::Embedded(font))
    }

    fn with_page_font(settings: RenderSettings, font: PageFont) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.new_object_id();

        Self {
            settings,
            doc,
            pages_id,
            font_id,
            page_ids: Vec::new(),
            font,
        }
    }

    /// Append one page showing `grid`.
    ///
    /// Fails without adding a page if a word cannot be shown in the font.
    pub fn render(&mut self, grid: &Grid, style: PageStyle) -> Result<()> {
        let operations = self.page_operations(grid, style)?;
        let content = Content { operations }
            .encode()
            .map_err(|e| FlashcardError::Render(format!("failed to encode page content: {}", e)))?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));

        let (width, height) = self.settings.paper.dimensions();
        let resources = Dictionary::from_iter([(
            "Font",
            Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(self.font_id))])),
        )]);

        let page_id = self.doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), width.into(), height.into()]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]));
        self.page_ids.push(page_id);
        Ok(())
    }

    fn page_operations(&mut self, grid: &Grid, style: PageStyle) -> Result<Vec<Operation>> {
        let (width, height) = self.settings.paper.dimensions();
        let rows = grid.row_count().max(1);
        let cols = grid.col_count().max(1);
        let cell_w = width / cols as f32;
        let cell_h = height / rows as f32;
        let top = height + self.settings.top_offset;

        let [r, g, b] = style.stroke_rgb();
        let mut ops = vec![
            Operation::new("q", vec![]),
            Operation::new("w", vec![GRID_LINE_WIDTH.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
        ];
        for row in 0..rows {
            for col in 0..cols {
                let x = col as f32 * cell_w;
                let y = top - (row + 1) as f32 * cell_h;
                ops.push(Operation::new(
                    "re",
                    vec![x.into(), y.into(), cell_w.into(), cell_h.into()],
                ));
            }
        }
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));

        ops.push(Operation::new("g", vec![0.into()]));
        for (row, cells) in grid.rows().iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                let center_x = (col as f32 + 0.5) * cell_w;
                let center_y = top - (row as f32 + 0.5) * cell_h;
                self.cell_text(&mut ops, text, center_x, center_y, cell_w, cell_h)?;
            }
        }
        Ok(ops)
    }

    /// Centre `text` in a cell, one word per line.
    fn cell_text(
        &mut self,
        ops: &mut Vec<Operation>,
        text: &str,
        center_x: f32,
        center_y: f32,
        cell_w: f32,
        cell_h: f32,
    ) -> Result<()> {
        let lines = text
            .split_whitespace()
            .map(|word| self.font.encode(word))
            .collect::<Result<Vec<EncodedText>>>()?;
        if lines.is_empty() {
            return Ok(());
        }

        let size = fit_font_size(
            self.settings.font_size,
            &lines,
            cell_w - 2.0 * CELL_PADDING,
            cell_h - 2.0 * CELL_PADDING,
        );
        let pitch = size * LEADING * LINES_PER_WORD;
        let block_height = pitch * (lines.len() - 1) as f32;
        let first_center = center_y + block_height / 2.0;

        for (i, line) in lines.into_iter().enumerate() {
            let line_width = line.width as f32 * size / 1000.0;
            let x = center_x - line_width / 2.0;
            let y = first_center - i as f32 * pitch - size * BASELINE_DROP;

            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
            ops.push(Operation::new("Td", vec![x.into(), y.into()]));
            ops.push(Operation::new("Tj", vec![self.font.show(line)]));
            ops.push(Operation::new("ET", vec![]));
        }
        Ok(())
    }

    /// Finish the document and return its bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let font = self.font.font_dictionary(&mut self.doc);
        self.doc.objects.insert(self.font_id, Object::Dictionary(font));

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();
        let pages = Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(self.page_ids.len() as i64)),
        ]);
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| FlashcardError::Render(format!("failed to serialize PDF: {}", e)))?;
        Ok(output)
    }

    /// Finish the document and write it to `path`.
    pub fn save(self, path: &std::path::Path) -> Result<()> {
        let bytes = self.into_bytes()?;
        std::fs::write(path, bytes).map_err(|source| FlashcardError::Output {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Largest size not above `max_size` at which every line fits the box.
fn fit_font_size(max_size: f32, lines: &[EncodedText], box_w: f32, box_h: f32) -> f32 {
    let widest = lines.iter().map(|l| l.width).max().unwrap_or(0) as f32 / 1000.0;
    let mut size = max_size;
    if widest > 0.0 && box_w > 0.0 {
        size = size.min(box_w / widest);
    }

    // Height in em of the text block: word lines plus the blank lines between
    let block_em = LEADING * (LINES_PER_WORD * (lines.len() - 1) as f32 + 1.0);
    if box_h > 0.0 {
        size = size.min(box_h / block_em);
    }
    size.max(1.0)
}
