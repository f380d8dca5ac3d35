//! Chat session controller.
//!
//! Owns one session's message history and its request lifecycle:
//!
//! - `submit` (Idle) appends the user message and spawns one service call.
//! - `settle` awaits that call and appends exactly one bot or error message.
//! - `submit` while Sending is ignored, so history always alternates one
//!   user entry with one terminal entry.
//!
//! The in-flight call is a tokio task owned by the controller. Dropping the
//! controller aborts it; a late reply can never reach a discarded session.

use std::sync::Arc;

use guidechat_core::config::QuickAction;
use guidechat_core::message::{ChatReply, Message, MessageId, SessionId};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::{ServiceError, SessionError};
use crate::ids::MessageIdGenerator;
use crate::service::ConversationService;
use crate::state::SessionState;

/// Text of the bot message appended when a service call fails.
pub const FAILURE_TEXT: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The text was empty after trimming.
    Empty,
    /// A request is already in flight.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was appended with this id and the call was issued.
    Accepted(MessageId),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

// =============================================================================
// Session
// =============================================================================

/// Observable state of one conversation.
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    input: String,
    loading: bool,
    typing: bool,
    welcome_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            loading: false,
            typing: false,
            welcome_visible: true,
        }
    }
}

impl Session {
    /// History in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// True until the first submission is accepted.
    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }
}

// =============================================================================
// SessionController
// =============================================================================

type InFlight = JoinHandle<Result<ChatReply, ServiceError>>;

/// Single-flight state machine driving a [`Session`].
///
/// `submit` spawns onto the current tokio runtime and must be called from
/// within one.
pub struct SessionController {
    id: SessionId,
    session: Session,
    state: SessionState,
    ids: MessageIdGenerator,
    service: Arc<dyn ConversationService>,
    in_flight: Option<InFlight>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("messages", &self.session.messages.len())
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl SessionController {
    pub fn new(service: Arc<dyn ConversationService>) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, "Session created");
        Self {
            id,
            session: Session::default(),
            state: SessionState::Idle,
            ids: MessageIdGenerator::new(),
            service,
            in_flight: None,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    pub fn input(&self) -> &str {
        self.session.input()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_typing(&self) -> bool {
        self.session.is_typing()
    }

    pub fn welcome_visible(&self) -> bool {
        self.session.welcome_visible()
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.session.input = text.into();
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> SubmitOutcome {
        let text = self.session.input.clone();
        self.submit(&text)
    }

    /// Run a predefined question exactly as if it had been typed.
    pub fn run_quick_action(&mut self, action: &QuickAction) -> SubmitOutcome {
        tracing::debug!(session_id = %self.id, label = %action.label, "Quick action");
        self.submit(&action.query)
    }

    /// Start a round trip for `text`.
    ///
    /// Ignored while a request is in flight or when `text` is blank; an
    /// ignored call leaves the session untouched, input buffer included.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if self.session.loading {
            tracing::debug!(session_id = %self.id, "Submit ignored: request in flight");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }
        let query = text.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Empty);
        }
        if let Err(e) = self.transition(SessionState::Sending) {
            tracing::warn!(session_id = %self.id, error = %e, "Submit rejected");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }

        let id = self.ids.next_id();
        self.session.input.clear();
        self.session.welcome_visible = false;
        self.session.messages.push(Message::user(id, query));
        self.session.loading = true;
        self.session.typing = true;

        tracing::info!(
            session_id = %self.id,
            message_id = %id,
            chars = query.chars().count(),
            "Sending message"
        );

        let service = Arc::clone(&self.service);
        let query = query.to_string();
        let span = tracing::debug_span!("chat_request", session_id = %self.id, message_id = %id);
        self.in_flight = Some(tokio::spawn(
            async move { service.ask(&query).await }.instrument(span),
        ));

        SubmitOutcome::Accepted(id)
    }

    /// Wait for the in-flight call and apply its terminal transition.
    ///
    /// Returns the appended bot or error message, or `None` when nothing
    /// was in flight.
    ///
    /// Cancel-safe: if this future is dropped before the call finishes, the
    /// request stays owned by the controller and a later `settle` picks it up.
    pub async fn settle(&mut self) -> Option<&Message> {
        let joined = self.in_flight.as_mut()?.await;
        self.in_flight = None;
        let result = match joined {
            Ok(result) => result,
            Err(e) => Err(ServiceError::Transport(format!("request task ended: {}", e))),
        };
        self.complete(result)
    }

    /// Submit `text` and wait for the reply. `None` if the submission was ignored.
    pub async fn send(&mut self, text: &str) -> Option<&Message> {
        match self.submit(text) {
            SubmitOutcome::Accepted(_) => self.settle().await,
            SubmitOutcome::Ignored(_) => None,
        }
    }

    fn complete(&mut self, result: Result<ChatReply, ServiceError>) -> Option<&Message> {
        let id = self.ids.next_id();
        let message = match result {
            Ok(reply) => {
                tracing::info!(
                    session_id = %self.id,
                    message_id = %id,
                    intent = reply.intent.as_deref().unwrap_or("-"),
                    "Reply received"
                );
                Message::bot(id, reply)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.id,
                    message_id = %id,
                    error = %e,
                    "Conversation service call failed"
                );
                Message::error(id, FAILURE_TEXT)
            }
        };

        self.session.messages.push(message);
        self.session.loading = false;
        self.session.typing = false;
        if let Err(e) = self.transition(SessionState::Idle) {
            tracing::warn!(session_id = %self.id, error = %e, "Unexpected completion");
        }
        self.session.messages.last()
    }

    fn transition(&mut self, target: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(&target) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        tracing::debug!(session_id = %self.id, from = %self.state, to = %target, "Session transition");
        self.state = target;
        Ok(())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            tracing::debug!(session_id = %self.id, "Aborting in-flight request");
            handle.abort();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
