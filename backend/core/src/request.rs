use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire payload for a chat-completion call.
///
/// Every field except `model` is carried as raw `serde_json::Value` so the
/// user's JSON reaches the upstream API exactly as typed; the editor and the
/// gateway validate presence, never shape. Optional fields are omitted from
/// the serialized body when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionPayload {
    pub model: String,
    pub messages: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
}

impl ChatCompletionPayload {
    pub fn new(model: impl Into<String>, messages: Value) -> Self {
        Self {
            model: model.into(),
            messages,
            functions: None,
            function_call: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let payload = ChatCompletionPayload::new("gpt-4o", json!([{"role": "user", "content": "hi"}]));
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("functions").is_none());
        assert!(body.get("function_call").is_none());
        assert_eq!(body["model"], "gpt-4o");
    }

    #[test]
    fn test_optional_fields_serialized_when_present() {
        let mut payload = ChatCompletionPayload::new("gpt-4o", json!([]));
        payload.functions = Some(json!([{"name": "f"}]));
        payload.function_call = Some(json!({"name": "f"}));
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["functions"][0]["name"], "f");
        assert_eq!(body["function_call"]["name"], "f");
    }
}
