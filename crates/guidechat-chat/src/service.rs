use async_trait::async_trait;
use guidechat_core::message::ChatReply;

use crate::error::ServiceError;

/// The remote collaborator that answers a visitor's message.
///
/// Implementations must be shareable across tasks: the session controller
/// runs each call on its own task.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Send one user utterance and wait for the reply.
    async fn ask(&self, message: &str) -> Result<ChatReply, ServiceError>;
}
