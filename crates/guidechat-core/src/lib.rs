pub mod config;
pub mod content;
pub mod error;
pub mod message;

pub use config::{GuideChatConfig, QuickAction};
pub use content::{ContentBlock, ItineraryDay, ListBlock, NestedItem, TableBlock, TimelinePeriod};
pub use error::{GuideChatError, Result};
pub use message::{ChatReply, Message, MessageContent, MessageId, SessionId};
