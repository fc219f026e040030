//! Cursor position tracking and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the row scroll offset. All
//! methods take `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use super::rows::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, display_width, inner_width, visual_rows,
};

pub(super) struct CursorState {
    /// Byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible row when content exceeds the viewport
    pub scroll_offset: u16,
    /// Area width from the last render (used for vertical movement)
    pub last_area_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_area_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Returns (row index, display column) of the cursor.
    fn row_and_col(&self, buffer: &str, width: u16) -> (usize, usize) {
        let rows = visual_rows(buffer, width);
        let row = rows
            .iter()
            .rposition(|r| r.start <= self.pos)
            .unwrap_or(0);
        let col = display_width(&buffer[rows[row].start..self.pos]);
        (row, col)
    }

    /// Move one visual row up (`direction < 0`) or down, keeping the column
    /// where possible. Returns `false` at the first/last row.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let width = inner_width(self.last_area_width);
        let rows = visual_rows(buffer, width);
        let (row, col) = self.row_and_col(buffer, width);

        let target = if direction < 0 {
            match row.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else if row + 1 < rows.len() {
            row + 1
        } else {
            return false;
        };

        // Walk the target row until the next char would pass the column.
        // The end of a soft-wrapped row is the start of the next one, so
        // stop a character short of it.
        let range = rows[target].clone();
        let soft_wrapped = rows
            .get(target + 1)
            .is_some_and(|next| next.start == range.end);
        let mut pos = range.start;
        let mut used = 0;
        for (i, c) in buffer[range.clone()].char_indices() {
            let w = c.width().unwrap_or(0);
            let next = range.start + i + c.len_utf8();
            if used + w > col || (soft_wrapped && next == range.end) {
                break;
            }
            used += w;
            pos = next;
        }
        self.pos = pos;
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let width = inner_width(area_width);
        let total = visual_rows(buffer, width).len() as u16;
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.row_and_col(buffer, width);
        let row = row as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen coordinates (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + 1, area.y + 1);
        }
        let (row, col) = self.row_and_col(buffer, width);
        let visible_row = (row as u16).saturating_sub(self.scroll_offset);
        let col = (col as u16).min(width);
        (area.x + CONTENT_OFFSET + col, area.y + 1 + visible_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(pos: usize, area_width: u16) -> CursorState {
        CursorState {
            pos,
            scroll_offset: 0,
            last_area_width: area_width,
        }
    }

    #[test]
    fn screen_pos_on_first_row() {
        let cursor = cursor_at(3, 20);
        assert_eq!(cursor.screen_pos("dry", Rect::new(0, 10, 20, 3)), (5, 11));
    }

    #[test]
    fn screen_pos_after_newline() {
        let buffer = "dry\n";
        let cursor = cursor_at(buffer.len(), 20);
        assert_eq!(cursor.screen_pos(buffer, Rect::new(0, 0, 20, 4)), (2, 2));
    }

    #[test]
    fn move_down_and_up_keeps_column() {
        // Inner width 4: rows "abcd", "ef"
        let buffer = "abcdef";
        let mut cursor = cursor_at(3, 8);
        assert!(cursor.move_vertically(buffer, 1));
        assert_eq!(cursor.pos, 6, "clamped to end of shorter row");
        assert!(cursor.move_vertically(buffer, -1));
        assert_eq!(cursor.pos, 2);
        assert!(!cursor.move_vertically(buffer, -1));
    }

    #[test]
    fn move_up_from_end_of_full_row_lands_on_previous_row() {
        // Inner width 4: rows "abcd", "efgh"
        let buffer = "abcdefgh";
        let mut cursor = cursor_at(buffer.len(), 8);
        assert!(cursor.move_vertically(buffer, -1));
        assert_eq!(cursor.pos, 3);
        assert_eq!(cursor.row_and_col(buffer, 4), (0, 3));
        assert!(!cursor.move_vertically(buffer, -1));
    }

    #[test]
    fn move_across_explicit_lines() {
        let buffer = "oily\nskin";
        let mut cursor = cursor_at(2, 40);
        assert!(cursor.move_vertically(buffer, 1));
        assert_eq!(&buffer[cursor.pos..], "in");
        assert!(!cursor.move_vertically(buffer, 1));
    }

    #[test]
    fn scroll_follows_cursor() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = cursor_at(buffer.len(), 40);
        cursor.update_scroll_offset(buffer, 40);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 40);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
