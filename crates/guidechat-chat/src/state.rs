//! Session request lifecycle.
//!
//! Valid transitions:
//! - Idle -> Sending (a non-empty submission was accepted)
//! - Sending -> Idle (the service call succeeded or failed)

use std::fmt;

/// Whether a Conversation Service call is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No request in flight. Ready to accept a submission.
    #[default]
    Idle,
    /// Exactly one request is in flight; submissions are ignored.
    Sending,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Sending => write!(f, "Sending"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Sending) | (SessionState::Sending, SessionState::Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "Idle");
        assert_eq!(SessionState::Sending.to_string(), "Sending");
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::Idle.can_transition_to(&SessionState::Sending));
        assert!(SessionState::Sending.can_transition_to(&SessionState::Idle));
    }

    #[test]
    fn test_self_transitions_are_invalid() {
        assert!(!SessionState::Idle.can_transition_to(&SessionState::Idle));
        assert!(!SessionState::Sending.can_transition_to(&SessionState::Sending));
    }
}
