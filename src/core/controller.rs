//! # Chat Controller
//!
//! Orchestrates one send/receive cycle at a time:
//!
//! ```text
//! InputSurface ──text──▶ ChatController ──ChatRequest──▶ ChatApi
//!                             │  ▲                          │
//!                             │  └────── ExchangeOutcome ───┘
//!                             ▼
//!                         MessageLog
//! ```
//!
//! `send_message()` is the whole cycle. Event loops that must keep drawing
//! while the request is in flight use its three phases directly:
//! `begin_send()` → `PendingExchange::dispatch()` → `settle()`.
//!
//! ## History vs. log
//!
//! The user's message is rendered immediately, but it only enters the
//! conversation history together with the assistant's reply. After a failed
//! exchange the log shows a user message that later requests will not carry.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::api::{ChatApi, ChatError, ChatRequest};
use crate::core::history::ConversationHistory;
use crate::core::surface::{InputSurface, LogRole, MessageLog};

/// Shown for every failed exchange, whatever the cause.
pub const ERROR_MESSAGE: &str = "❌ Error. Check that the backend and LM Studio are running.";

/// A request that has been rendered and snapshotted but not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExchange {
    request: ChatRequest,
}

impl PendingExchange {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Performs the single network round-trip.
    pub async fn dispatch(self, api: &dyn ChatApi) -> ExchangeOutcome {
        let result = api.chat(&self.request).await.map(|reply| reply.response);
        ExchangeOutcome {
            message: self.request.message,
            result,
        }
    }
}

/// Result of a dispatched exchange, fed back into `settle()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeOutcome {
    /// The trimmed user message that was sent.
    pub message: String,
    /// The assistant reply text, or why there is none.
    pub result: Result<String, ChatError>,
}

pub struct ChatController<I, L> {
    input: I,
    log: L,
    api: Arc<dyn ChatApi>,
    history: ConversationHistory,
    awaiting_response: bool,
    greeting: String,
}

impl<I: InputSurface, L: MessageLog> ChatController<I, L> {
    pub fn new(input: I, log: L, api: Arc<dyn ChatApi>, greeting: impl Into<String>) -> Self {
        Self {
            input,
            log,
            api,
            history: ConversationHistory::new(),
            awaiting_response: false,
            greeting: greeting.into(),
        }
    }

    /// Renders the assistant greeting.
    pub fn initialize(&mut self) {
        self.log.append_message(&self.greeting, LogRole::Assistant);
    }

    /// Runs one full exchange. No-op on blank input or while a request is
    /// already in flight.
    pub async fn send_message(&mut self) {
        let Some(pending) = self.begin_send() else {
            return;
        };
        let api = Arc::clone(&self.api);
        let outcome = pending.dispatch(api.as_ref()).await;
        self.settle(outcome);
    }

    /// Takes the input, renders it, and enters the loading state.
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty or a response is still pending.
    pub fn begin_send(&mut self) -> Option<PendingExchange> {
        if self.awaiting_response {
            debug!("Send ignored: request already in flight");
            return None;
        }

        let message = self.input.text().trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.log.append_message(&message, LogRole::User);
        self.input.clear();
        self.enter_loading();

        info!(
            "Dispatching message ({} bytes) with {} prior turns",
            message.len(),
            self.history.len()
        );

        Some(PendingExchange {
            request: ChatRequest {
                message,
                conversation_history: self.history.snapshot(),
            },
        })
    }

    /// Renders the outcome of a dispatched exchange and leaves the loading
    /// state, on success and on failure alike.
    pub fn settle(&mut self, outcome: ExchangeOutcome) {
        if !self.awaiting_response {
            warn!("Outcome received while idle; ignoring");
            return;
        }

        match outcome.result {
            Ok(reply) => {
                self.log.append_message(&reply, LogRole::Assistant);
                self.history.record_exchange(outcome.message, reply);
                debug!("Exchange recorded, history now {} turns", self.history.len());
            }
            Err(e) => {
                warn!("Exchange failed: {}", e);
                self.log.append_message(ERROR_MESSAGE, LogRole::System);
            }
        }

        self.exit_loading();
    }

    fn enter_loading(&mut self) {
        self.awaiting_response = true;
        self.input.set_enabled(false);
        self.log.show_loading();
    }

    fn exit_loading(&mut self) {
        self.awaiting_response = false;
        self.input.set_enabled(true);
        self.log.hide_loading();
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn api(&self) -> Arc<dyn ChatApi> {
        Arc::clone(&self.api)
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut L {
        &mut self.log
    }
}
