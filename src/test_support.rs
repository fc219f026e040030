//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ChatApi, ChatError, ChatReply, ChatRequest, HealthStatus};
use crate::core::controller::ChatController;
use crate::core::surface::{InputSurface, LogRole, MessageLog};

/// Input surface backed by plain fields.
#[derive(Debug)]
pub struct FakeInput {
    pub text: String,
    pub enabled: bool,
    pub disable_count: usize,
}

impl Default for FakeInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
            disable_count: 0,
        }
    }
}

impl InputSurface for FakeInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.disable_count += 1;
        }
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Message log that records every call.
#[derive(Debug, Default)]
pub struct RecordingLog {
    pub entries: Vec<(String, LogRole)>,
    pub loading: bool,
    pub loading_shown_count: usize,
}

impl MessageLog for RecordingLog {
    fn append_message(&mut self, text: &str, role: LogRole) {
        self.entries.push((text.to_string(), role));
    }

    fn show_loading(&mut self) {
        self.loading = true;
        self.loading_shown_count += 1;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }
}

/// Backend that answers from a queue and records every request.
pub struct ScriptedApi {
    replies: Mutex<VecDeque<Result<ChatReply, ChatError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedApi {
    pub fn new(replies: Vec<Result<ChatReply, ChatError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a successful reply.
    pub fn reply(text: &str) -> Result<ChatReply, ChatError> {
        Ok(ChatReply {
            response: text.to_string(),
            sources: Vec::new(),
            timestamp: None,
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for ScriptedApi {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Network("no scripted reply".into())))
    }

    async fn health(&self) -> Result<HealthStatus, ChatError> {
        Ok(HealthStatus {
            status: "ok".into(),
            message: None,
            timestamp: None,
            version: Some("test".into()),
        })
    }
}

/// Creates a controller wired to fakes, plus a handle to inspect requests.
pub fn test_controller(
    replies: Vec<Result<ChatReply, ChatError>>,
) -> (ChatController<FakeInput, RecordingLog>, Arc<ScriptedApi>) {
    let api = Arc::new(ScriptedApi::new(replies));
    let controller = ChatController::new(
        FakeInput::default(),
        RecordingLog::default(),
        api.clone(),
        "Hello from the advisor",
    );
    (controller, api)
}
