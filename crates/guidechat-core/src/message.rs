//! Chat messages and the Conversation Service reply payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::content::ContentBlock;

/// Identifier of a message, unique within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a chat session, used to correlate log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ChatReply
// =============================================================================

/// Success payload returned by the Conversation Service.
///
/// At least one of `text`/`parts` is expected but not enforced. A legacy
/// `response_text` field fills `text` only when it is a string and `text`
/// is absent; any other shape is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReplyWire")]
pub struct ChatReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<ContentBlock>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Deserialize)]
struct ReplyWire {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    response_text: Option<Value>,
    #[serde(default)]
    parts: Option<Vec<ContentBlock>>,
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl From<ReplyWire> for ChatReply {
    fn from(wire: ReplyWire) -> Self {
        let legacy = match wire.response_text {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };
        Self {
            text: wire.text.or(legacy),
            parts: wire.parts,
            intent: wire.intent,
            confidence: wire.confidence,
        }
    }
}

impl ChatReply {
    /// A plain-text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A structured reply.
    pub fn parts(parts: Vec<ContentBlock>) -> Self {
        Self {
            parts: Some(parts),
            ..Self::default()
        }
    }

    /// Attach classification metadata.
    pub fn with_intent(mut self, intent: impl Into<String>, confidence: f64) -> Self {
        self.intent = Some(intent.into());
        self.confidence = Some(confidence);
        self
    }
}

// =============================================================================
// Message
// =============================================================================

/// One entry of a session's history. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<ContentBlock>>,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub is_error: bool,
}

/// What a message displays: structured parts win over plain text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageContent<'a> {
    Parts(&'a [ContentBlock]),
    Text(&'a str),
}

impl Message {
    /// The visitor's own input.
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
            parts: None,
            is_bot: false,
            timestamp: Utc::now(),
            intent: None,
            confidence: None,
            is_error: false,
        }
    }

    /// A bot message built from a service reply.
    pub fn bot(id: MessageId, reply: ChatReply) -> Self {
        Self {
            id,
            text: reply.text,
            parts: reply.parts,
            is_bot: true,
            timestamp: Utc::now(),
            intent: reply.intent,
            confidence: reply.confidence,
            is_error: false,
        }
    }

    /// A synthesized bot message standing in for a failed round trip.
    pub fn error(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
            parts: None,
            is_bot: true,
            timestamp: Utc::now(),
            intent: None,
            confidence: None,
            is_error: true,
        }
    }

    /// The content to display. A message with neither field shows empty text.
    pub fn content(&self) -> MessageContent<'_> {
        match (&self.parts, &self.text) {
            (Some(parts), _) => MessageContent::Parts(parts),
            (None, Some(text)) => MessageContent::Text(text),
            (None, None) => MessageContent::Text(""),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
