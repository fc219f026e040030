//! # TitleBar Component
//!
//! Single-line status bar: product name, backend address, a short status,
//! and a "↓ New" hint when the log has content below the viewport.
//!
//! Purely presentational. All fields are props supplied by the parent each
//! frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub backend_url: &'a str,
    pub status_message: &'a str,
    /// Backend reported a problem; status is drawn as a warning
    pub degraded: bool,
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        backend_url: &'a str,
        status_message: &'a str,
        degraded: bool,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            backend_url,
            status_message,
            degraded,
            has_unseen_content,
        }
    }

    fn status_style(&self) -> Style {
        if self.degraded {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                "SkinCare Advisor",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", self.backend_url),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(self.status_message, self.status_style()));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(bar: &TitleBar) -> String {
        bar.line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn test_default_format() {
        let bar = TitleBar::new("http://localhost:5000", "", false, false);
        assert_eq!(plain(&bar), "SkinCare Advisor (http://localhost:5000)");
    }

    #[test]
    fn test_status_and_unseen_hint() {
        let bar = TitleBar::new("http://localhost:5000", "Backend v0.1.0 ok", false, true);
        assert_eq!(
            plain(&bar),
            "SkinCare Advisor (http://localhost:5000) | Backend v0.1.0 ok | ↓ New"
        );
    }

    #[test]
    fn test_degraded_status_is_red() {
        let bar = TitleBar::new("http://localhost:5000", "Backend unreachable", true, false);
        let line = bar.line();
        let status = line
            .spans
            .iter()
            .find(|s| s.content == "Backend unreachable")
            .unwrap();
        assert_eq!(status.style.fg, Some(Color::Red));

        let healthy = TitleBar::new("http://localhost:5000", "Backend v0.1.0 ok", false, false);
        let line = healthy.line();
        let status = line
            .spans
            .iter()
            .find(|s| s.content == "Backend v0.1.0 ok")
            .unwrap();
        assert_eq!(status.style.fg, None);
    }
}
