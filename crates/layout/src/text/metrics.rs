//! Advance widths for the standard Helvetica faces, in 1/1000 em.
//!
//! Only the printable ASCII range is tabulated. The bullet glyph has its own
//! entry and anything else is measured as an average-width character, which
//! is what the WinAnsi fallback glyph occupies on the page anyway.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
}

impl FontFace {
    /// PostScript name of the base-14 font behind this face.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

const FIRST: u32 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const BULLET_WIDTH: u16 = 350;
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of `c` in 1/1000 em.
pub fn char_width(face: FontFace, c: char) -> u16 {
    let table = match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    match c {
        '\u{2022}' => BULLET_WIDTH,
        c if (c as u32) >= FIRST && (c as u32) < FIRST + table.len() as u32 => {
            table[(c as u32 - FIRST) as usize]
        }
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `size`.
pub fn measure_text(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(face, c) as u32).sum();
    units as f32 * size / 1000.0
}
