use crate::api::Turn;

/// Ordered, append-only record of completed exchanges.
///
/// Turns only ever arrive as a `[user, assistant]` pair once the backend has
/// answered successfully. Failed exchanges leave no trace here even though
/// their user message stays visible in the log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed exchange.
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(Turn::user(user));
        self.turns.push(Turn::assistant(assistant));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Owned copy for a request payload.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    #[test]
    fn test_new_history_is_empty() {
        let history = ConversationHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_record_exchange_appends_user_then_assistant() {
        let mut history = ConversationHistory::new();
        history.record_exchange("Oily T-zone", "Try a gel cleanser.");
        history.record_exchange("And at night?", "Add niacinamide.");

        let roles: Vec<Role> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(history.turns()[2].content, "And at night?");
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut history = ConversationHistory::new();
        history.record_exchange("a", "b");
        let snapshot = history.snapshot();
        history.record_exchange("c", "d");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(history.len(), 4);
    }
}
