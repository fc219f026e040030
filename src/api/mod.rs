//! # Backend API
//!
//! The `ChatApi` trait is the seam between the chat controller and the
//! advisor backend. `HttpChatApi` talks to the real server over reqwest;
//! tests substitute a scripted implementation.

pub mod client;
pub mod types;

use std::fmt;

use async_trait::async_trait;

pub use client::HttpChatApi;
pub use types::{ChatReply, ChatRequest, HealthStatus, Role, Turn};

/// Errors that can occur while talking to the backend.
///
/// The chat UI shows the same message for every variant; the distinction
/// exists for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// Client could not be built (bad TLS setup, etc.).
    Config(String),
    /// Network-level failure (connection refused, DNS, timeout).
    Network(String),
    /// Backend answered with a non-2xx status.
    Http { status: u16, body: String },
    /// 2xx body was not JSON or lacked a string `response` field.
    MalformedResponse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Config(msg) => write!(f, "client config error: {msg}"),
            ChatError::Network(msg) => write!(f, "network error: {msg}"),
            ChatError::Http { status, body } => write!(f, "HTTP error {status}: {body}"),
            ChatError::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends one message with its prior history and returns the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;

    /// Probes backend liveness.
    async fn health(&self) -> Result<HealthStatus, ChatError>;
}
