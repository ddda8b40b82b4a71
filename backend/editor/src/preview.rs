//! Read-only views over a completion response body.
//!
//! Every view is a pure function, tolerant of any shape: a malformed or
//! unexpected body yields a fixed fallback string, never a panic.

use serde_json::Value;

/// The response text exactly as received.
pub fn raw(response: &str) -> &str {
    response
}

/// First choice's `function_call.arguments`, pretty-printed.
///
/// The upstream API carries `arguments` as a JSON-encoded string; it is
/// decoded before printing. Any missing path or parse failure yields the
/// fixed fallback.
pub fn function_call_args(response: &str) -> String {
    serde_json::from_str::<Value>(response)
        .ok()
        .as_ref()
        .and_then(|body| body.pointer("/choices/0/message/function_call/arguments"))
        .and_then(pretty_arguments)
        .unwrap_or_else(|| "No function_call.arguments found or not valid JSON.".to_string())
}

fn pretty_arguments(args: &Value) -> Option<String> {
    match args {
        Value::String(text) => serde_json::from_str::<Value>(text)
            .ok()
            .map(|decoded| pretty(&decoded)),
        other => Some(pretty(other)),
    }
}

/// First choice's assistant message content.
pub fn completion_text(response: &str) -> String {
    serde_json::from_str::<Value>(response)
        .ok()
        .as_ref()
        .and_then(|body| body.pointer("/choices/0/message/content"))
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "No completion result found.".to_string())
}

/// The whole body pretty-printed; empty input stays empty.
pub fn pretty_json(response: &str) -> String {
    if response.is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Value>(response) {
        Ok(body) => pretty(&body),
        Err(_) => "Not valid JSON.".to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("Value serialization is infallible")
}
