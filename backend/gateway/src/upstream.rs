use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use callpad_core::ChatCompletionPayload;

/// Chat-completions API the gateway forwards to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1";

/// Upstream chat-completions client.
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// One POST to the chat-completions endpoint, credential as bearer
    /// token, no retry. Returns the upstream JSON body.
    pub async fn complete(&self, api_key: &str, payload: &ChatCompletionPayload) -> Result<Value> {
        debug!(model = %payload.model, "Sending request upstream");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .context("Upstream HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Upstream returned {}: {}", status, error_body);
        }

        response
            .json()
            .await
            .context("Failed to parse upstream response")
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> ChatCompletionPayload {
        ChatCompletionPayload::new("gpt-4o", json!([{"role": "user", "content": "hi"}]))
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_token_and_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"chatcmpl-1","choices":[]}"#)
            .create_async()
            .await;

        let upstream = UpstreamClient::new().with_base_url(server.url());
        let body = upstream.complete("sk-test", &payload()).await.unwrap();
        assert_eq!(body["id"], "chatcmpl-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_surfaces_upstream_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let upstream = UpstreamClient::new().with_base_url(server.url());
        let err = upstream.complete("sk-bad", &payload()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Incorrect API key provided"));
    }
}
