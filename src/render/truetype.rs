//! Embedded TrueType fonts, for scripts the built-in font cannot show.
//!
//! The font program is embedded whole as a `CIDFontType2` descendant of a
//! `Type0` font with `Identity-H` encoding. Every character is written as
//! its two-byte glyph id (`/CIDToGIDMap /Identity`), and a `ToUnicode` CMap
//! maps the glyphs that were used back to characters so text can be
//! searched and copied out of the PDF.

use super::encoding::EncodedText;
use crate::error::{FlashcardError, Result};
use lopdf::{Dictionary, Document, Object, Stream};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// bfchar entries per CMap block (PDF limit)
const BFCHAR_BLOCK: usize = 100;

pub struct TrueTypeFont {
    base_name: String,
    data: Vec<u8>,
    face: fontdue::Font,
    /// Glyph id -> (character, advance width in 1/1000 em)
    used: BTreeMap<u16, (char, u32)>,
}

impl TrueTypeFont {
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| FlashcardError::FontUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let data = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let face = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default())
            .map_err(|e| unavailable(e.to_string()))?;
        let base_name = base_font_name(path);
        debug!("Loaded font {} from {}", base_name, path.display());

        Ok(Self {
            base_name,
            data,
            face,
            used: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.base_name
    }

    pub fn encode(&mut self, word: &str) -> Result<EncodedText> {
        let mut bytes = Vec::with_capacity(word.chars().count() * 2);
        let mut width = 0u32;

        for c in word.chars() {
            let gid = self.face.lookup_glyph_index(c);
            if gid == 0 {
                return Err(FlashcardError::UnprintableText {
                    word: word.to_string(),
                    character: c,
                    font: self.base_name.clone(),
                });
            }

            let face = &self.face;
            let (_, advance) = *self.used.entry(gid).or_insert_with(|| {
                let advance = face.metrics_indexed(gid, 1000.0).advance_width;
                (c, advance.round().max(0.0) as u32)
            });
            bytes.extend_from_slice(&gid.to_be_bytes());
            width += advance;
        }

        Ok(EncodedText { bytes, width })
    }

    /// Add the font program, descriptor, CID font and ToUnicode map to
    /// `doc`, returning the `Type0` font dictionary that pages refer to.
    pub fn font_dictionary(&self, doc: &mut Document) -> Dictionary {
        let (ascent, descent) = self
            .face
            .horizontal_line_metrics(1000.0)
            .map(|m| (m.ascent.round() as i64, m.descent.round() as i64))
            .unwrap_or((800, -200));

        let program_id = doc.add_object(Stream::new(
            Dictionary::from_iter([("Length1", Object::Integer(self.data.len() as i64))]),
            self.data.clone(),
        ));

        let descriptor_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"FontDescriptor".to_vec())),
            ("FontName", Object::Name(self.base_name.clone().into_bytes())),
            // Nonsymbolic
            ("Flags", Object::Integer(32)),
            (
                "FontBBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(descent),
                    Object::Integer(1000),
                    Object::Integer(ascent),
                ]),
            ),
            ("ItalicAngle", Object::Integer(0)),
            ("Ascent", Object::Integer(ascent)),
            ("Descent", Object::Integer(descent)),
            ("CapHeight", Object::Integer(ascent)),
            ("StemV", Object::Integer(80)),
            ("FontFile2", Object::Reference(program_id)),
        ]));

        let cid_font_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"CIDFontType2".to_vec())),
            ("BaseFont", Object::Name(self.base_name.clone().into_bytes())),
            (
                "CIDSystemInfo",
                Object::Dictionary(Dictionary::from_iter([
                    ("Registry", Object::string_literal("Adobe")),
                    ("Ordering", Object::string_literal("Identity")),
                    ("Supplement", Object::Integer(0)),
                ])),
            ),
            ("FontDescriptor", Object::Reference(descriptor_id)),
            ("DW", Object::Integer(1000)),
            ("W", Object::Array(self.widths())),
            ("CIDToGIDMap", Object::Name(b"Identity".to_vec())),
        ]));

        let to_unicode_id = doc.add_object(Stream::new(Dictionary::new(), self.to_unicode_cmap().into_bytes()));

        Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type0".to_vec())),
            ("BaseFont", Object::Name(self.base_name.clone().into_bytes())),
            ("Encoding", Object::Name(b"Identity-H".to_vec())),
            ("DescendantFonts", Object::Array(vec![Object::Reference(cid_font_id)])),
            ("ToUnicode", Object::Reference(to_unicode_id)),
        ])
    }

    /// `/W` entries for the glyphs shown: `gid [width]` pairs.
    fn widths(&self) -> Vec<Object> {
        self.used
            .iter()
            .flat_map(|(&gid, &(_, width))| {
                [
                    Object::Integer(i64::from(gid)),
                    Object::Array(vec![Object::Integer(i64::from(width))]),
                ]
            })
            .collect()
    }

    fn to_unicode_cmap(&self) -> String {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let entries: Vec<(&u16, &(char, u32))> = self.used.iter().collect();
        for block in entries.chunks(BFCHAR_BLOCK) {
            let _ = writeln!(cmap, "{} beginbfchar", block.len());
            for (gid, (c, _)) in block {
                let mut units = [0u16; 2];
                let utf16: String = c.encode_utf16(&mut units).iter().map(|u| format!("{:04X}", u)).collect();
                let _ = writeln!(cmap, "<{:04X}> <{}>", gid, utf16);
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );
        cmap
    }
}

/// PDF font name from the file stem: `DejaVu Sans.ttf` -> `DejaVu-Sans`.
fn base_font_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name: String = stem
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect();
    if name.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        name
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// A TrueType font with Latin, Greek and Cyrillic coverage, if the
    /// machine has one installed.
    pub(crate) fn system_font() -> Option<PathBuf> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
    }

    #[test]
    fn test_base_font_name() {
        assert_eq!(base_font_name(Path::new("/fonts/DejaVuSans.ttf")), "DejaVuSans");
        assert_eq!(base_font_name(Path::new("Ubuntu Medium.ttf")), "Ubuntu-Medium");
        assert_eq!(base_font_name(Path::new("Šrift.ttf")), "rift");
        assert_eq!(base_font_name(Path::new("чат.ttf")), "EmbeddedFont");
    }

    #[test]
    fn test_missing_font_file() {
        let err = TrueTypeFont::load(Path::new("/nonexistent/font.ttf")).err().unwrap();
        assert!(matches!(err, FlashcardError::FontUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }

    #[test]
    fn test_non_font_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let err = TrueTypeFont::load(&path).err().unwrap();
        assert!(matches!(err, FlashcardError::FontUnavailable { .. }));
    }

    #[test]
    fn test_encode_cyrillic_as_glyph_ids() {
        let Some(path) = system_font() else {
            eprintln!("no DejaVuSans.ttf installed, skipping");
            return;
        };
        let mut font = TrueTypeFont::load(&path).unwrap();

        let text = font.encode("собака").unwrap();
        assert_eq!(text.bytes.len(), 12);
        assert!(text.width > 0);
        // с, о, б, а, к: 'а' appears twice
        assert_eq!(font.used.len(), 5);
        assert_ne!(&text.bytes[0..2], &[0, 0]);
        assert_eq!(&text.bytes[6..8], &text.bytes[10..12]);
    }

    #[test]
    fn test_glyph_outside_font_is_rejected() {
        let Some(path) = system_font() else {
            eprintln!("no DejaVuSans.ttf installed, skipping");
            return;
        };
        let mut font = TrueTypeFont::load(&path).unwrap();

        match font.encode("中文") {
            Err(FlashcardError::UnprintableText { word, character, font }) => {
                assert_eq!(word, "中文");
                assert_eq!(character, '中');
                assert_eq!(font, "DejaVuSans");
            }
            other => panic!("expected UnprintableText, got {:?}", other.map(|t| t.bytes)),
        }
    }

    #[test]
    fn test_to_unicode_maps_used_glyphs() {
        let Some(path) = system_font() else {
            eprintln!("no DejaVuSans.ttf installed, skipping");
            return;
        };
        let mut font = TrueTypeFont::load(&path).unwrap();
        let text = font.encode("пёс").unwrap();

        let cmap = font.to_unicode_cmap();
        let gid = u16::from_be_bytes([text.bytes[0], text.bytes[1]]);
        assert!(cmap.contains("3 beginbfchar"));
        assert!(cmap.contains(&format!("<{:04X}> <043F>", gid)));
        assert!(cmap.contains("<0451>"));
    }
}
