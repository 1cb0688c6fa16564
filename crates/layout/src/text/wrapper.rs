//! Greedy line breaking against a maximum width.

use super::metrics::{FontFace, measure_text};

/// Break `text` into lines no wider than `max_width` points.
///
/// Hard newlines always start a new line and empty input lines are kept as
/// empty output lines. Words wider than the whole line are split by character.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        break_paragraph(paragraph, face, size, max_width, &mut lines);
    }
    lines
}

fn break_paragraph(paragraph: &str, face: FontFace, size: f32, max_width: f32, out: &mut Vec<String>) {
    let space = measure_text(" ", face, size);
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in paragraph.split_whitespace() {
        let word_width = measure_text(word, face, size);

        if !current.is_empty() && current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            let mut pieces = split_word(word, face, size, max_width);
            // The tail stays open so following words can join it.
            let tail = pieces.pop().unwrap_or_default();
            out.extend(pieces);
            current_width = measure_text(&tail, face, size);
            current = tail;
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
}

fn split_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && measure_text(&candidate, face, size) > max_width {
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// A labelled entry broken with a hanging indent.
#[derive(Debug, Clone, PartialEq)]
pub struct HangingLines {
    /// Offset of continuation lines from the entry's left edge.
    pub indent: f32,
    /// The first line carries the label prefix, the rest are text only.
    pub lines: Vec<String>,
}

/// Wrap `text` under a `label` so continuation lines align with the first
/// line's text rather than with the label.
pub fn hanging_wrap(label: &str, text: &str, face: FontFace, size: f32, max_width: f32) -> HangingLines {
    let prefix = format!("{label} ");
    let indent = measure_text(&prefix, face, size);
    let mut lines = wrap_text(text, face, size, (max_width - indent).max(1.0));
    match lines.first_mut() {
        Some(first) => first.insert_str(0, &prefix),
        None => lines.push(prefix.trim_end().to_string()),
    }
    HangingLines { indent, lines }
}
