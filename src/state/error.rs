//! State management-specific error types.

/// Errors that can occur during state transitions.
///
/// A rejected transition leaves the current state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Transition not allowed from the current variant
    #[error("Cannot {action} while {machine} is {from}")]
    InvalidTransition {
        machine: &'static str,
        from: &'static str,
        action: &'static str,
    },

    /// Queue position below 1
    #[error("Queue position must be at least 1")]
    InvalidQueuePosition,

    /// Queue position moved backwards within one queue span
    #[error("Queue position increased from {from} to {to}")]
    QueuePositionIncreased { from: u32, to: u32 },

    /// Draft was empty when sent
    #[error("Cannot send an empty chat message")]
    EmptyDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::InvalidTransition {
            machine: "chat",
            from: "idle",
            action: "send a message",
        };
        assert_eq!(error.to_string(), "Cannot send a message while chat is idle");

        let error = StateError::InvalidQueuePosition;
        assert!(error.to_string().contains("at least 1"));

        let error = StateError::QueuePositionIncreased { from: 3, to: 4 };
        assert!(error.to_string().contains("from 3 to 4"));

        let error = StateError::EmptyDraft;
        assert!(error.to_string().contains("empty"));
    }
}
