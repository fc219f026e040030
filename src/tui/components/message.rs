use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::surface::LogRole;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;

/// One rendered entry of the message log. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub role: LogRole,
    pub at: DateTime<Local>,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, role: LogRole) -> Self {
        Self {
            text: text.into(),
            role,
            at: Local::now(),
        }
    }
}

/// A stateless widget that renders a single log entry with role-based styling.
///
/// - **User** (green): what the user sent
/// - **Assistant** (blue): advisor replies and the greeting
/// - **System** (red): error notices
pub struct Message<'a> {
    pub entry: &'a LogEntry,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a LogEntry) -> Self {
        Self { entry }
    }

    /// Predicts rendered height without rendering.
    ///
    /// The wrapping options must match Ratatui's `Paragraph` word wrapping so
    /// the scroll canvas is sized exactly.
    pub fn calculate_height(entry: &LogEntry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return VERTICAL_OVERHEAD;
        }

        let content = entry.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub fn role_style(role: LogRole) -> Style {
    match role {
        LogRole::User => Style::default().fg(Color::Green),
        LogRole::Assistant => Style::default().fg(Color::Blue),
        LogRole::System => Style::default().fg(Color::Red),
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.entry.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.entry.role.label())
            .title_top(Line::from(self.entry.at.format("%H:%M").to_string()).right_aligned())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.entry.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_single_line_height_includes_borders() {
        let entry = LogEntry::new("Single line", LogRole::User);
        assert_eq!(Message::calculate_height(&entry, 80), 3);
    }

    #[test]
    fn test_height_trims_surrounding_whitespace() {
        let entry = LogEntry::new("\n\n   Trim me   \n\n", LogRole::Assistant);
        assert_eq!(Message::calculate_height(&entry, 80), 3);
    }

    #[test]
    fn test_long_text_wraps() {
        let entry = LogEntry::new(
            "Apply a ceramide moisturizer twice daily and avoid hot showers",
            LogRole::Assistant,
        );
        // 24 wide - 4 overhead = 20 columns of text
        assert!(Message::calculate_height(&entry, 24) >= 5);
    }

    #[test]
    fn test_degenerate_width() {
        let entry = LogEntry::new("x", LogRole::System);
        // Borders still need their two rows
        assert_eq!(Message::calculate_height(&entry, 3), VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_role_and_text() {
        let entry = LogEntry::new("Try a ceramide moisturizer.", LogRole::Assistant);
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(Message::new(&entry), area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("advisor"));
        assert!(text.contains("Try a ceramide moisturizer."));
    }
}
