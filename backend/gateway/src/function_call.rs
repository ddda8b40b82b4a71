//! Function-call proxy endpoint (`POST /apis/function-call`).

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use callpad_core::ChatCompletionPayload;
use callpad_logging::redact_credentials;

use crate::server::GatewayState;

/// Incoming proxy body. Everything except presence is left unvalidated;
/// the upstream API is the judge of shape.
#[derive(Debug, Deserialize)]
pub struct FunctionCallRequest {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub messages: Option<Value>,
    pub functions: Option<Value>,
    pub function_call: Option<Value>,
}

/// Handler for `POST /apis/function-call`.
///
/// Credential comes from the `x-api-key` header, falling back to the body's
/// `apiKey` field. The upstream body is relayed as-is on success; any
/// upstream failure becomes a 500 with the failure message.
pub async fn function_call(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<FunctionCallRequest>,
) -> (StatusCode, Json<Value>) {
    let request_id = Uuid::new_v4();

    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or(body.api_key)
        .filter(|key| !key.is_empty());
    let Some(api_key) = api_key else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "API key missing" })),
        );
    };

    let model = body.model.filter(|model| !model.is_empty());
    let (Some(model), Some(messages)) = (model, body.messages) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing model or messages in request body." })),
        );
    };

    let payload = ChatCompletionPayload {
        model,
        messages,
        functions: body.functions,
        function_call: body.function_call,
    };

    info!(%request_id, model = %payload.model, "Forwarding function-call request upstream");

    match state.upstream.complete(&api_key, &payload).await {
        Ok(upstream_body) => (StatusCode::OK, Json(upstream_body)),
        Err(err) => {
            let message = err.to_string();
            warn!(%request_id, error = %redact_credentials(&message), "Upstream call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
        }
    }
}
