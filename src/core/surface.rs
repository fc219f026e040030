//! # Surfaces
//!
//! The two UI collaborators the chat controller drives. The terminal adapter
//! implements them with real widgets; tests implement them with recorders.

/// Display role of a rendered log entry.
///
/// `System` entries are UI-only (error notices) and never enter the
/// conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRole {
    User,
    Assistant,
    System,
}

impl LogRole {
    pub fn label(self) -> &'static str {
        match self {
            LogRole::User => "you",
            LogRole::Assistant => "advisor",
            LogRole::System => "system",
        }
    }
}

/// Text field plus send control.
pub trait InputSurface {
    /// Current raw text value.
    fn text(&self) -> &str;

    fn clear(&mut self);

    /// Enables or disables both the text field and the send control.
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;
}

/// Append-only, auto-scrolling message log.
pub trait MessageLog {
    /// Appends one read-only entry at the end and scrolls it into view.
    /// Consecutive calls never merge.
    fn append_message(&mut self, text: &str, role: LogRole);

    /// Shows the transient typing indicator below the last entry.
    fn show_loading(&mut self);

    /// Removes the typing indicator. No-op when it is not shown.
    fn hide_loading(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels_are_distinct() {
        let labels = [
            LogRole::User.label(),
            LogRole::Assistant.label(),
            LogRole::System.label(),
        ];
        assert_eq!(labels, ["you", "advisor", "system"]);
    }
}
