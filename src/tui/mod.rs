//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the UI, and
//! translates keyboard and mouse events into calls on the chat controller.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (reply pending): draws every ~80ms so the typing
//!   indicator moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   results, or terminal resize.
//!
//! ## Background work
//!
//! The event loop is synchronous. Network calls run as tokio tasks and report
//! back over an `mpsc` channel as [`Action`] values, which the loop drains
//! once per iteration.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ChatApi, ChatError, HealthStatus, HttpChatApi};
use crate::core::config::ResolvedConfig;
use crate::core::controller::{ChatController, ExchangeOutcome, PendingExchange};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::AdvisorController;

/// Results delivered from background tasks to the event loop.
#[derive(Debug)]
pub enum Action {
    ExchangeSettled(ExchangeOutcome),
    HealthChecked(Result<HealthStatus, ChatError>),
}

/// TUI-specific presentation state (not part of the chat cycle)
pub struct TuiState {
    pub backend_url: String,
    pub status_message: String,
    /// Last health probe failed or reported a non-ok status
    pub backend_degraded: bool,
}

impl TuiState {
    pub fn new(backend_url: String) -> Self {
        Self {
            backend_url,
            status_message: String::new(),
            backend_degraded: false,
        }
    }

    /// Turns a health probe result into the title-bar status.
    pub fn record_health(&mut self, result: Result<HealthStatus, ChatError>) {
        match result {
            Ok(status) => {
                info!("Health check: {:?}", status);
                self.backend_degraded = !status.is_ok();
                self.status_message = status.label();
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                self.backend_degraded = true;
                self.status_message = "Backend unreachable".to_string();
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = HttpChatApi::new(config.api_base_url.clone(), config.request_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let api: Arc<dyn ChatApi> = Arc::new(api);

    let mut controller: AdvisorController = ChatController::new(
        InputBox::new(),
        MessageListState::new(),
        Arc::clone(&api),
        config.greeting.clone(),
    );
    controller.initialize();

    let mut tui = TuiState::new(config.api_base_url.clone());

    let (tx, rx) = mpsc::channel();

    if config.health_check {
        spawn_health_check(Arc::clone(&api), tx.clone());
    } else {
        debug!("Health check disabled");
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = controller.is_awaiting_response();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &mut controller, &tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit => should_quit = true,
                // Quitting mid-request would drop the reply on the floor
                TuiEvent::Escape if controller.is_awaiting_response() => {}
                TuiEvent::Escape => should_quit = true,
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    controller.log_mut().handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::SubmitRequested) =
                        controller.input_mut().handle_event(&event)
                        && let Some(pending) = controller.begin_send()
                    {
                        spawn_exchange(pending, controller.api(), tx.clone());
                    }
                }
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            match action {
                Action::ExchangeSettled(outcome) => {
                    debug!("Exchange settled (ok={})", outcome.result.is_ok());
                    controller.settle(outcome);
                }
                Action::HealthChecked(result) => tui.record_health(result),
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Runs the exchange on the runtime and always reports back, even if the
/// request task panics, so the input is never left disabled.
fn spawn_exchange(pending: PendingExchange, api: Arc<dyn ChatApi>, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request");
    let message = pending.request().message.clone();

    tokio::spawn(async move {
        let request = tokio::spawn(async move { pending.dispatch(api.as_ref()).await });

        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Chat request task failed: {}", e);
                ExchangeOutcome {
                    message,
                    result: Err(ChatError::Network(e.to_string())),
                }
            }
        };

        if tx.send(Action::ExchangeSettled(outcome)).is_err() {
            warn!("Failed to deliver exchange outcome: receiver dropped");
        }
    });
}

fn spawn_health_check(api: Arc<dyn ChatApi>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = api.health().await;
        if tx.send(Action::HealthChecked(result)).is_err() {
            debug!("Health result dropped: receiver gone");
        }
    });
}
