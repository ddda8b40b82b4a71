use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use callpad_core::ChatCompletionPayload;

use crate::error::SubmitError;

/// Where the local proxy listens unless told otherwise.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:8000";

/// HTTP client for the local function-call proxy.
///
/// One POST per submission; the credential travels in the `x-api-key`
/// header, never in the body.
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ProxyClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_PROXY_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Submit the payload and return the proxy's JSON body.
    ///
    /// Non-2xx with a readable error body becomes [`SubmitError::Gateway`];
    /// an unreachable proxy or an unreadable body either way becomes
    /// [`SubmitError::Transport`].
    pub async fn call(
        &self,
        api_key: &str,
        payload: &ChatCompletionPayload,
    ) -> Result<Value, SubmitError> {
        debug!(model = %payload.model, "Submitting request to proxy");

        let response = self
            .client
            .post(format!("{}/apis/function-call", self.base_url))
            .header("x-api-key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|_| SubmitError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.map_err(|_| SubmitError::Transport)?;
            return Err(SubmitError::Gateway(
                body.error.unwrap_or_else(|| "Request failed.".to_string()),
            ));
        }

        response.json().await.map_err(|_| SubmitError::Transport)
    }
}

impl Default for ProxyClient {
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
    async fn test_call_returns_proxy_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/apis/function-call")
            .match_header("x-api-key", "sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"hi"}}]}"#)
            .create_async()
            .await;

        let client = ProxyClient::new().with_base_url(server.url());
        let body = client.call("sk-test", &payload()).await.unwrap();
        assert_eq!(body["choices"][0]["message"]["content"], "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_relays_error_body_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/apis/function-call")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"API key missing"}"#)
            .create_async()
            .await;

        let client = ProxyClient::new().with_base_url(server.url());
        let err = client.call("", &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Gateway("API key missing".to_string()));
    }

    #[tokio::test]
    async fn test_call_falls_back_when_error_body_has_no_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/apis/function-call")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = ProxyClient::new().with_base_url(server.url());
        let err = client.call("sk-test", &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Gateway("Request failed.".to_string()));
    }

    #[tokio::test]
    async fn test_call_treats_unparseable_error_body_as_transport() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/apis/function-call")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let client = ProxyClient::new().with_base_url(server.url());
        let err = client.call("sk-test", &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Transport);
    }

    #[tokio::test]
    async fn test_call_unreachable_proxy_is_transport() {
        // Nothing listens on the discard port.
        let client = ProxyClient::new().with_base_url("http://127.0.0.1:9");
        let err = client.call("sk-test", &payload()).await.unwrap_err();
        assert_eq!(err, SubmitError::Transport);
    }
}
