//! # Core Application Logic
//!
//! The chat round-trip and conversation state. Knows nothing about any
//! specific UI technology; it drives whatever implements the surface traits.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatController       │
//!                    │  • ConversationHistory  │
//!                    │  • Surface traits       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Fakes    │      │  ChatApi   │
//!     │  Adapter   │      │  (tests)   │      │  (reqwest) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: `ChatController`, one send/receive cycle at a time
//! - [`history`]: `ConversationHistory`, append-only completed turns
//! - [`surface`]: `InputSurface` and `MessageLog` traits
//! - [`config`]: layered configuration

pub mod config;
pub mod controller;
pub mod history;
pub mod surface;
