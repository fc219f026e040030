//! Transient "advisor is typing" entry shown at the bottom of the log while a
//! reply is pending.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::surface::LogRole;
use crate::tui::components::message::role_style;

pub const HEIGHT: u16 = 3;
const LABEL: &str = "Advisor is analyzing…";
const DOTS: usize = 3;

pub struct TypingIndicator {
    pub frame: usize,
}

impl TypingIndicator {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }

    /// Three dots with one lit, cycling left to right.
    fn dots(&self) -> String {
        let lit = (self.frame / 2) % DOTS;
        (0..DOTS)
            .map(|i| if i == lit { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(LogRole::Assistant);
        let dim = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(LogRole::Assistant.label())
            .border_type(BorderType::Rounded)
            .border_style(dim)
            .title_style(dim)
            .padding(Padding::horizontal(1));

        let line = Line::from(vec![
            Span::styled(self.dots(), style),
            Span::raw("  "),
            Span::styled(LABEL, Style::default().add_modifier(Modifier::ITALIC)),
        ]);

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(line).render(inner, buf);
    }
}
