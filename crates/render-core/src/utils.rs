/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Encode text for a WinAnsi base-14 font. The bullet maps to its WinAnsi
/// code point and anything outside Latin-1 becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95,
            '\u{2026}' => 0x85,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            c if (c as u32) <= 255 => c as u8,
            _ => b'?',
        })
        .collect()
}
