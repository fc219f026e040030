//! Wire types for the advisor backend.
//!
//! ```text
//! POST /api/chat
//!   → { "message": "...", "conversation_history": [{ "role": "user", "content": "..." }, ...] }
//!   ← { "response": "...", "sources": [...], "timestamp": "..." }
//!
//! GET /api/health
//!   ← { "status": "ok", "message": "...", "timestamp": "...", "version": "0.1.0" }
//! ```

use serde::{Deserialize, Serialize};

/// Author of a turn in the conversation history.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation history sent back to the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /api/chat`.
///
/// `conversation_history` holds the turns that existed before `message` was
/// submitted; the current message travels only in `message`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<Turn>,
}

/// Success body of `POST /api/chat`.
///
/// Only `response` is required. The backend also attaches the retrieval
/// sources it used and a generation timestamp.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Short label for the title bar, e.g. "Backend v0.1.0 ok".
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("Backend v{} {}", version, self.status),
            None => format!("Backend {}", self.status),
        }
    }
}
