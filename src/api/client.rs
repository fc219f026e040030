use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{ChatReply, ChatRequest, HealthStatus};
use super::{ChatApi, ChatError};

/// HTTP client for the advisor backend.
///
/// No retries and no backoff: a failed request is reported once and the user
/// resends manually.
pub struct HttpChatApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatApi {
    /// Builds a client for `base_url` (e.g. `http://localhost:5000`).
    ///
    /// With `timeout = None` a hung request waits forever.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("HttpChatApi targeting {} (timeout: {:?})", base_url, timeout);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        info!(
            "POST /api/chat: message_len={}, history_len={}",
            request.message.len(),
            request.conversation_history.len()
        );

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Chat response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Chat API error: {} - {}", status.as_u16(), body);
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            warn!("Chat API returned unparseable body: {}", e);
            ChatError::MalformedResponse(e.to_string())
        })?;

        debug!(
            "Chat reply: {} bytes, {} sources, timestamp={:?}",
            reply.response.len(),
            reply.sources.len(),
            reply.timestamp
        );
        Ok(reply)
    }

    async fn health(&self) -> Result<HealthStatus, ChatError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = HttpChatApi::new("http://localhost:5000/", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_timeout_is_accepted() {
        let api = HttpChatApi::new("http://localhost:5000", Some(Duration::from_secs(30))).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
    }
}
