//! Single-byte text encoding for the built-in Helvetica font.
//!
//! Printable ASCII maps to itself (WinAnsi base encoding). Other supported
//! characters get a code from 0x80 upwards in first-use order and are named
//! in the font's `/Differences` array. A word with a character that has no
//! glyph name, or that needs more than the 128 extra slots, cannot be shown.

use super::metrics::{ascii_width, glyph_width};
use crate::error::{FlashcardError, Result};

pub const BUILTIN_FONT: &str = "Helvetica";

const FIRST_EXTRA_CODE: u8 = 0x80;
const MAX_EXTRA_GLYPHS: usize = 128;

/// Glyph names for U+00A0..=U+00FF.
const LATIN1_NAMES: [&str; 96] = [
    "space", "exclamdown", "cent", "sterling", "currency", "yen", "brokenbar", "section",
    "dieresis", "copyright", "ordfeminine", "guillemotleft", "logicalnot", "hyphen", "registered", "macron",
    "degree", "plusminus", "twosuperior", "threesuperior", "acute", "mu", "paragraph", "periodcentered",
    "cedilla", "onesuperior", "ordmasculine", "guillemotright", "onequarter", "onehalf", "threequarters", "questiondown",
    "Agrave", "Aacute", "Acircumflex", "Atilde", "Adieresis", "Aring", "AE", "Ccedilla",
    "Egrave", "Eacute", "Ecircumflex", "Edieresis", "Igrave", "Iacute", "Icircumflex", "Idieresis",
    "Eth", "Ntilde", "Ograve", "Oacute", "Ocircumflex", "Otilde", "Odieresis", "multiply",
    "Oslash", "Ugrave", "Uacute", "Ucircumflex", "Udieresis", "Yacute", "Thorn", "germandbls",
    "agrave", "aacute", "acircumflex", "atilde", "adieresis", "aring", "ae", "ccedilla",
    "egrave", "eacute", "ecircumflex", "edieresis", "igrave", "iacute", "icircumflex", "idieresis",
    "eth", "ntilde", "ograve", "oacute", "ocircumflex", "otilde", "odieresis", "divide",
    "oslash", "ugrave", "uacute", "ucircumflex", "udieresis", "yacute", "thorn", "ydieresis",
];

/// Glyph names for U+0100..=U+017F (Latin Extended-A).
const LATIN_EXT_A_NAMES: [&str; 128] = [
    "Amacron", "amacron", "Abreve", "abreve", "Aogonek", "aogonek", "Cacute", "cacute",
    "Ccircumflex", "ccircumflex", "Cdotaccent", "cdotaccent", "Ccaron", "ccaron", "Dcaron", "dcaron",
    "Dcroat", "dcroat", "Emacron", "emacron", "Ebreve", "ebreve", "Edotaccent", "edotaccent",
    "Eogonek", "eogonek", "Ecaron", "ecaron", "Gcircumflex", "gcircumflex", "Gbreve", "gbreve",
    "Gdotaccent", "gdotaccent", "Gcommaaccent", "gcommaaccent", "Hcircumflex", "hcircumflex", "Hbar", "hbar",
    "Itilde", "itilde", "Imacron", "imacron", "Ibreve", "ibreve", "Iogonek", "iogonek",
    "Idotaccent", "dotlessi", "IJ", "ij", "Jcircumflex", "jcircumflex", "Kcommaaccent", "kcommaaccent",
    "kgreenlandic", "Lacute", "lacute", "Lcommaaccent", "lcommaaccent", "Lcaron", "lcaron", "Ldot",
    "ldot", "Lslash", "lslash", "Nacute", "nacute", "Ncommaaccent", "ncommaaccent", "Ncaron",
    "ncaron", "napostrophe", "Eng", "eng", "Omacron", "omacron", "Obreve", "obreve",
    "Ohungarumlaut", "ohungarumlaut", "OE", "oe", "Racute", "racute", "Rcommaaccent", "rcommaaccent",
    "Rcaron", "rcaron", "Sacute", "sacute", "Scircumflex", "scircumflex", "Scedilla", "scedilla",
    "Scaron", "scaron", "Tcommaaccent", "tcommaaccent", "Tcaron", "tcaron", "Tbar", "tbar",
    "Utilde", "utilde", "Umacron", "umacron", "Ubreve", "ubreve", "Uring", "uring",
    "Uhungarumlaut", "uhungarumlaut", "Uogonek", "uogonek", "Wcircumflex", "wcircumflex", "Ycircumflex", "ycircumflex",
    "Ydieresis", "Zacute", "zacute", "Zdotaccent", "zdotaccent", "Zcaron", "zcaron", "longs",
];

fn glyph_name(c: char) -> Option<&'static str> {
    match c as u32 {
        0xA0..=0xFF => Some(LATIN1_NAMES[(c as u32 - 0xA0) as usize]),
        0x100..=0x17F => Some(LATIN_EXT_A_NAMES[(c as u32 - 0x100) as usize]),
        _ => match c {
            '€' => Some("Euro"),
            '–' => Some("endash"),
            '—' => Some("emdash"),
            '‘' => Some("quoteleft"),
            '’' => Some("quoteright"),
            '‚' => Some("quotesinglbase"),
            '“' => Some("quotedblleft"),
            '”' => Some("quotedblright"),
            '„' => Some("quotedblbase"),
            '…' => Some("ellipsis"),
            _ => None,
        },
    }
}

/// Text encoded for a `Tj` operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub bytes: Vec<u8>,
    /// Advance width in 1/1000 em
    pub width: u32,
}

/// Assigns byte codes to glyphs for one document.
#[derive(Debug, Default)]
pub struct GlyphEncoding {
    extra: Vec<(char, &'static str)>,
}

impl GlyphEncoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, word: &str) -> Result<EncodedText> {
        let mut bytes = Vec::with_capacity(word.len());
        let mut width = 0u32;

        for c in word.chars() {
            if let Some(w) = ascii_width(c) {
                bytes.push(c as u8);
                width += u32::from(w);
                continue;
            }

            let (code, name) = self.code_for(c).ok_or_else(|| FlashcardError::UnprintableText {
                word: word.to_string(),
                character: c,
                font: BUILTIN_FONT.to_string(),
            })?;
            bytes.push(code);
            width += u32::from(glyph_width(name));
        }

        Ok(EncodedText { bytes, width })
    }

    fn code_for(&mut self, c: char) -> Option<(u8, &'static str)> {
        if let Some(index) = self.extra.iter().position(|(assigned, _)| *assigned == c) {
            return Some((FIRST_EXTRA_CODE + index as u8, self.extra[index].1));
        }

        let name = glyph_name(c)?;
        if self.extra.len() >= MAX_EXTRA_GLYPHS {
            return None;
        }
        self.extra.push((c, name));
        Some((FIRST_EXTRA_CODE + (self.extra.len() - 1) as u8, name))
    }

    /// Glyph names for codes 0x80.., in code order.
    pub fn differences(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extra.iter().map(|(_, name)| *name)
    }

    pub fn first_extra_code(&self) -> u8 {
        FIRST_EXTRA_CODE
    }
}
