//! Error types for the chat session and its services.

use crate::state::SessionState;

/// Failures of a Conversation Service round trip.
///
/// The session controller treats every variant the same way: it appends one
/// generic error message and returns to idle.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode reply: {0}")]
    Decode(String),
    #[error("invalid intents document: {0}")]
    Intents(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::Decode(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

/// Errors raised by the session state machine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = ServiceError::Status {
            status: 500,
            body: "Internal server error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service returned HTTP 500: Internal server error"
        );

        let err = ServiceError::Decode("expected value".to_string());
        assert_eq!(err.to_string(), "could not decode reply: expected value");

        let err = ServiceError::Intents("missing field `intents`".to_string());
        assert!(err.to_string().starts_with("invalid intents document"));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::InvalidTransition {
            from: SessionState::Idle,
            to: SessionState::Idle,
        };
        assert_eq!(err.to_string(), "invalid session transition: Idle -> Idle");
    }
}
