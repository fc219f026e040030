//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status line
//! - `Message`: one log entry
//! - `TypingIndicator`: the pending-reply placeholder
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: the chat input surface
//! - `MessageList` / `MessageListState`: the scrollable message log
//!
//! Components receive external data as props, never by reaching into global
//! state, so each can be rendered against a `TestBackend` in isolation.

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;
pub mod typing_indicator;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
