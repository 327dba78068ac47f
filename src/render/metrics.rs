//! Advance widths of Helvetica, in 1/1000 em.

/// Widths of the printable ASCII range 0x20..=0x7E (WinAnsi order).
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

const DEFAULT_WIDTH: u16 = 556;

/// Width of an ASCII character, or `None` outside the printable range.
pub fn ascii_width(c: char) -> Option<u16> {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        Some(ASCII_WIDTHS[(code - 0x20) as usize])
    } else {
        None
    }
}

/// Approximate width of a named glyph outside ASCII.
///
/// Accented letters take the width of their base letter, which is the first
/// character of their glyph name (`ccaron` -> `c`).
pub fn glyph_width(name: &str) -> u16 {
    match name {
        "AE" | "OE" => 1000,
        "ae" | "oe" => 944,
        "germandbls" | "oslash" => 611,
        "Oslash" => 778,
        "space" => 278,
        _ => name
            .chars()
            .next()
            .filter(char::is_ascii_alphabetic)
            .and_then(ascii_width)
            .unwrap_or(DEFAULT_WIDTH),
    }
}
