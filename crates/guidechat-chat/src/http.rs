//! HTTP client for the Conversation Service.
//!
//! `POST {base_url}/api/chat/` with `{ "message": ... }`. Any transport
//! failure or non-2xx status is an error; the body of a failed response is
//! kept for logging only.

use async_trait::async_trait;
use guidechat_core::config::ServiceConfig;
use guidechat_core::message::ChatReply;
use reqwest::Client;
use serde::Serialize;

use crate::error::ServiceError;
use crate::service::ConversationService;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Conversation Service reached over HTTP.
///
/// No request timeout is configured: a call that never completes leaves the
/// session waiting until it is torn down.
#[derive(Debug, Clone)]
pub struct HttpConversationService {
    client: Client,
    chat_url: String,
}

impl HttpConversationService {
    /// Create a client posting to the given endpoint URL.
    pub fn new(chat_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            chat_url: chat_url.into(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.chat_url())
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl ConversationService for HttpConversationService {
    async fn ask(&self, message: &str) -> Result<ChatReply, ServiceError> {
        tracing::debug!(
            url = %self.chat_url,
            chars = message.chars().count(),
            "POST chat message"
        );

        let response = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<ChatReply>(&bytes)
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}
