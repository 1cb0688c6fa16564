//! Outline Numbering Resolver.
//!
//! Turns the lines of one outline section into display labels in a single
//! pass. Numbered lines count only numbered lines; bullet lines render `•`
//! and leave the counter untouched.

use serde::{Deserialize, Serialize};
use visit_report_types::OutlineLine;

pub const BULLET_GLYPH: &str = "\u{2022}";

/// Counter format for a numbered section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListStyle {
    /// `1`, `2`, `3`
    Decimal,
    /// `a`, `b`, … `z`, `aa`, `bb`
    LowerAlpha,
    /// `A`, `B`, … `Z`, `AA`, `BB`
    UpperAlpha,
    /// `i`, `ii`, `iii`
    LowerRoman,
    /// `I`, `II`, `III`
    UpperRoman,
}

impl ListStyle {
    /// The counter text for `n` (1-based), without trailing punctuation.
    pub fn format(&self, n: u32) -> String {
        match self {
            ListStyle::Decimal => n.to_string(),
            ListStyle::LowerAlpha => alphabetic(n),
            ListStyle::UpperAlpha => alphabetic(n).to_ascii_uppercase(),
            ListStyle::LowerRoman => roman(n),
            ListStyle::UpperRoman => roman(n).to_ascii_uppercase(),
        }
    }

    /// The matching `w:numFmt` value for WordprocessingML numbering.
    pub fn word_num_fmt(&self) -> &'static str {
        match self {
            ListStyle::Decimal => "decimal",
            ListStyle::LowerAlpha => "lowerLetter",
            ListStyle::UpperAlpha => "upperLetter",
            ListStyle::LowerRoman => "lowerRoman",
            ListStyle::UpperRoman => "upperRoman",
        }
    }
}

/// Letters repeat past `z` (`aa`, `bb`, …), the same sequence word processors
/// produce for letter numbering.
fn alphabetic(n: u32) -> String {
    if n == 0 {
        return String::new();
    }
    let index = (n - 1) % 26;
    let repeat = (n - 1) / 26 + 1;
    let letter = char::from(b'a' + index as u8);
    std::iter::repeat_n(letter, repeat as usize).collect()
}

fn roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

/// Display label of one resolved line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// A counted line: `value` is the 1-based ordinal, `text` its rendering (`"2."`, `"b."`).
    Ordinal { value: u32, text: String },
    Bullet,
}

impl Label {
    pub fn display(&self) -> &str {
        match self {
            Label::Ordinal { text, .. } => text,
            Label::Bullet => BULLET_GLYPH,
        }
    }

    pub fn ordinal(&self) -> Option<u32> {
        match self {
            Label::Ordinal { value, .. } => Some(*value),
            Label::Bullet => None,
        }
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self, Label::Bullet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub text: String,
    pub label: Label,
}

impl ResolvedLine {
    /// `"<label> <text>"`, the visible first line of the entry.
    pub fn labelled(&self) -> String {
        format!("{} {}", self.label.display(), self.text)
    }
}

/// Resolve labels for one section. Blank lines are dropped before numbering.
pub fn resolve_outline(lines: &[OutlineLine], style: ListStyle) -> Vec<ResolvedLine> {
    let mut counter = 0u32;
    lines
        .iter()
        .filter(|line| !line.is_blank())
        .map(|line| {
            let label = if line.is_bullet {
                Label::Bullet
            } else {
                counter += 1;
                Label::Ordinal {
                    value: counter,
                    text: format!("{}.", style.format(counter)),
                }
            };
            ResolvedLine {
                text: line.text.clone(),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use visit_report_types::Outline;

    fn labels(resolved: &[ResolvedLine]) -> Vec<&str> {
        resolved.iter().map(|l| l.label.display()).collect()
    }

    #[test]
    fn bullets_do_not_advance_the_counter() {
        let outline = Outline::from_stored("Crack in wall\n\tminor\nLeak detected");
        let resolved = resolve_outline(outline.lines(), ListStyle::Decimal);

        let rendered: Vec<String> = resolved.iter().map(ResolvedLine::labelled).collect();
        assert_eq!(rendered, vec!["1. Crack in wall", "• minor", "2. Leak detected"]);
    }

    #[test]
    fn followups_use_letters() {
        let outline = Outline::from_stored("Repair\n    seal joint\nMonitor\nReport");
        let resolved = resolve_outline(outline.lines(), ListStyle::LowerAlpha);
        assert_eq!(labels(&resolved), vec!["a.", "•", "b.", "c."]);
    }

    #[test]
    fn blank_lines_are_dropped_before_numbering() {
        let outline = Outline::from_stored("one\n\n   \n\t\ntwo");
        let resolved = resolve_outline(outline.lines(), ListStyle::Decimal);
        assert_eq!(labels(&resolved), vec!["1.", "2."]);
        assert_eq!(resolved[1].text, "two");
    }

    #[test]
    fn ordinals_are_dense_and_ordered() {
        let lines: Vec<OutlineLine> = (0..40)
            .map(|i| {
                if i % 3 == 0 {
                    OutlineLine::bullet(format!("b{i}"))
                } else {
                    OutlineLine::numbered(format!("n{i}"))
                }
            })
            .collect();
        let resolved = resolve_outline(&lines, ListStyle::Decimal);
        let ordinals: Vec<u32> = resolved.iter().filter_map(|l| l.label.ordinal()).collect();
        let expected: Vec<u32> = (1..=ordinals.len() as u32).collect();
        assert_eq!(ordinals, expected);
        assert_eq!(resolved.iter().filter(|l| l.label.is_bullet()).count(), 14);
    }

    #[test]
    fn bullet_text_never_keeps_the_marker() {
        let outline = Outline::from_stored("\tfirst\n    second");
        for line in resolve_outline(outline.lines(), ListStyle::Decimal) {
            assert!(!line.labelled().contains('\t'));
            assert!(!line.text.starts_with(' '));
        }
    }

    #[test]
    fn alphabetic_labels_repeat_past_z() {
        assert_eq!(ListStyle::LowerAlpha.format(1), "a");
        assert_eq!(ListStyle::LowerAlpha.format(26), "z");
        assert_eq!(ListStyle::LowerAlpha.format(27), "aa");
        assert_eq!(ListStyle::UpperAlpha.format(28), "BB");
        assert_eq!(ListStyle::LowerAlpha.format(52), "zz");
        assert_eq!(ListStyle::LowerAlpha.format(53), "aaa");
        assert_eq!(ListStyle::UpperAlpha.format(54), "BBB");
    }

    #[test]
    fn roman_labels() {
        assert_eq!(ListStyle::UpperRoman.format(4), "IV");
        assert_eq!(ListStyle::LowerRoman.format(14), "xiv");
        assert_eq!(ListStyle::UpperRoman.format(1990), "MCMXC");
    }

    #[test]
    fn list_style_deserializes_camel_case() {
        let style: ListStyle = serde_json::from_str("\"lowerAlpha\"").unwrap();
        assert_eq!(style, ListStyle::LowerAlpha);
        assert_eq!(style.word_num_fmt(), "lowerLetter");
    }
}
