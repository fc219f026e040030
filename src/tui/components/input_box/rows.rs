//! Visual row layout and boundary helpers for the InputBox.
//!
//! The input box hard-wraps by display width instead of word-wrapping, so the
//! rows computed here are exactly the rows drawn and the cursor always lands
//! where the user expects, even with wide glyphs.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + left padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into byte ranges, one per drawn row.
///
/// A row ends at a `\n` (excluded from the range) or when the next character
/// would overflow `width` columns. There is always at least one row.
pub(super) fn visual_rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut start = 0;
    let mut col = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            rows.push(start..i);
            start = i + 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col > 0 && col + w > width {
            rows.push(start..i);
            start = i;
            col = 0;
        }
        col += w;
    }
    rows.push(start..text.len());
    rows
}

/// Display width of a string slice.
pub(super) fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let head = text[..pos].trim_end_matches(|c: char| !is_word_char(c));
    match head.char_indices().rev().find(|&(_, c)| !is_word_char(c)) {
        Some((i, c)) => i + c.len_utf8(),
        None => 0,
    }
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let tail = &text[pos..];
    let skipped = tail.len() - tail.trim_start_matches(|c: char| !is_word_char(c)).len();
    let rest = &tail[skipped..];
    pos + skipped + rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_texts(text: &str, width: u16) -> Vec<&str> {
        visual_rows(text, width)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn empty_text_has_one_row() {
        assert_eq!(row_texts("", 10), vec![""]);
    }

    #[test]
    fn newlines_split_rows() {
        assert_eq!(row_texts("dry\nflaky", 20), vec!["dry", "flaky"]);
        assert_eq!(row_texts("trailing\n", 20), vec!["trailing", ""]);
    }

    #[test]
    fn long_text_hard_wraps_at_width() {
        assert_eq!(row_texts("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wide_glyphs_count_double() {
        // Each CJK character is two columns wide.
        assert_eq!(row_texts("肌肌肌", 4), vec!["肌肌", "肌"]);
        assert_eq!(display_width("肌a"), 3);
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        let s = "a🔥b";
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 0), 0);
        assert_eq!(next_char_boundary(s, s.len()), s.len());
    }

    #[test]
    fn word_motion() {
        let s = "dry skin_care, now";
        assert_eq!(next_word_boundary(s, 0), 3);
        assert_eq!(next_word_boundary(s, 3), 13);
        assert_eq!(prev_word_boundary(s, s.len()), 15);
        assert_eq!(prev_word_boundary(s, 15), 4);
        assert_eq!(prev_word_boundary(s, 4), 0);
        assert_eq!(next_word_boundary(s, s.len()), s.len());
    }
}
