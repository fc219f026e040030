//! # InputBox Component
//!
//! The terminal side of the chat input surface.
//!
//! ## Responsibilities
//!
//! - Capture text input, including multi-line composition (Shift+Enter)
//! - Handle editing (backspace, delete, cursor and word movement, paste)
//! - Emit a submit request on Enter
//! - Go inert while the controller is waiting for a reply
//!
//! ## State Management
//!
//! The buffer and the enabled flag are internal state, driven by the chat
//! controller through the `InputSurface` trait. Cursor position and scroll
//! state are encapsulated in `CursorState`.

mod cursor;
mod rows;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::surface::InputSurface;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use rows::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, next_word_boundary,
    prev_char_boundary, prev_word_boundary, visual_rows,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the controller reads and trims the buffer itself.
    SubmitRequested,
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    enabled: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            enabled: true,
            cursor: CursorState::new(),
        }
    }

    /// Required height for the current buffer, clamped to
    /// `[1, MAX_VISIBLE_LINES]` content rows plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = visual_rows(&self.buffer, inner_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, area_width: u16) -> Vec<Line<'_>> {
        let width = inner_width(area_width);
        if width == 0 {
            return Vec::new();
        }
        visual_rows(&self.buffer, width)
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .map(|range| Line::raw(&self.buffer[range]))
            .collect()
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::ContentChanged
        })
    }
}

impl InputSurface for InputBox {
    fn text(&self) -> &str {
        &self.buffer
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_area_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let (title, style) = if self.enabled {
            (
                " Message · Enter to send · Shift+Enter for newline ",
                Style::default().fg(Color::Green),
            )
        } else {
            (
                " Waiting for the advisor… ",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(title);

        let input = Paragraph::new(self.visible_lines(area.width))
            .block(block)
            .style(style);
        frame.render_widget(input, area);

        if self.enabled {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // A disabled input is inert: no edits, no submission.
        if !self.enabled {
            return None;
        }

        match event {
            TuiEvent::Submit => Some(InputEvent::SubmitRequested),
            TuiEvent::InputChar(c) => {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF pastes so rows split cleanly.
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::WordLeft => self.move_to(prev_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::WordRight => self.move_to(next_word_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(InputEvent::ContentChanged),
            _ => None,
        }
    }
}
