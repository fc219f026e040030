use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::controller::ChatController;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputBox, MessageList, MessageListState, TitleBar};

pub type AdvisorController = ChatController<InputBox, MessageListState>;

pub fn draw_ui(
    frame: &mut Frame,
    controller: &mut AdvisorController,
    tui: &TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};

    let input_height = controller.input().calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    // Message log first so the title bar sees this frame's unseen-content flag
    MessageList::new(controller.log_mut(), spinner_frame).render(frame, main_area);

    let (status, degraded) = if controller.is_awaiting_response() {
        ("Thinking…", false)
    } else {
        (tui.status_message.as_str(), tui.backend_degraded)
    };
    TitleBar::new(
        &tui.backend_url,
        status,
        degraded,
        controller.log().has_unseen_content,
    )
    .render(frame, title_area);

    controller.input_mut().render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::core::surface::InputSurface;
    use crate::test_support::ScriptedApi;
    use crate::tui::component::EventHandler;
    use crate::tui::event::TuiEvent;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn controller() -> AdvisorController {
        let api = Arc::new(ScriptedApi::new(vec![]));
        let mut controller =
            ChatController::new(InputBox::new(), MessageListState::new(), api, "Hi there");
        controller.initialize();
        controller
    }

    #[test]
    fn test_draws_greeting_title_and_input() {
        let mut controller = controller();
        let tui = TuiState::new("http://localhost:5000".to_string());
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();

        terminal
            .draw(|f| draw_ui(f, &mut controller, &tui, 0))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("SkinCare Advisor"));
        assert!(text.contains("Hi there"));
        assert!(text.contains("Enter to send"));
    }

    #[test]
    fn test_pending_exchange_shows_indicator_and_thinking() {
        let mut controller = controller();
        for c in "Oily T-zone".chars() {
            controller.input_mut().handle_event(&TuiEvent::InputChar(c));
        }
        let pending = controller.begin_send();
        assert!(pending.is_some());
        assert_eq!(controller.input().text(), "");

        let tui = TuiState::new("http://localhost:5000".to_string());
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal
            .draw(|f| draw_ui(f, &mut controller, &tui, 0))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Thinking…"));
        assert!(text.contains("Oily T-zone"));
        assert!(text.contains("Advisor is analyzing…"));
        assert!(text.contains("Waiting for the advisor…"));
    }
}
