//! Chat session controller and Conversation Service clients.
//!
//! The [`SessionController`] owns a session's message history and enforces
//! single-flight request handling: at most one Conversation Service call is
//! outstanding at a time. Services are pluggable through the
//! [`ConversationService`] trait; an HTTP client and an offline keyword
//! responder are provided.

pub mod error;
pub mod http;
pub mod ids;
pub mod responder;
pub mod service;
pub mod session;
pub mod state;

pub use error::{ServiceError, SessionError};
pub use http::HttpConversationService;
pub use ids::MessageIdGenerator;
pub use responder::{IntentDefinition, IntentsDocument, KeywordResponder};
pub use service::ConversationService;
pub use session::{IgnoreReason, Session, SessionController, SubmitOutcome, FAILURE_TEXT};
pub use state::SessionState;
