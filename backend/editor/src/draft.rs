use serde::{Deserialize, Serialize};

/// Model used when the stored record has none.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Starter conversation shown in a fresh editor.
pub const DEFAULT_MESSAGES: &str = r#"[
  {
    "role": "system",
    "content": "You are a helpful assistant."
  },
  {
    "role": "user",
    "content": "Hello!"
  }
]"#;

const SAMPLE_MESSAGES: &str = r#"[
  { "role": "system", "content": "Please strictly follow the function return format to generate a list of questions." },
  { "role": "user", "content": "what is the price of Bitcoin?" }
]"#;

const SAMPLE_FUNCTIONS: &str = r#"[
  {
    "name": "generate_questions",
    "description": "Returns a list of strings, each element is a research question",
    "parameters": {
      "type": "object",
      "properties": {
        "questions": {
          "type": "array",
          "items": { "type": "string" }
        }
      },
      "required": ["questions"]
    }
  }
]"#;

/// The user-editable request fields, exactly as typed.
///
/// JSON-bearing fields stay raw text until submission; parsing happens per
/// attempt. The whole struct is the single record persisted by
/// [`crate::storage::DraftStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDraft {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: String,
    #[serde(default)]
    pub functions: String,
    #[serde(default)]
    pub function_call: String,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            messages: DEFAULT_MESSAGES.to_string(),
            functions: String::new(),
            function_call: String::new(),
        }
    }
}

impl RequestDraft {
    /// Rebuild a draft from a stored record.
    ///
    /// A record that fails to parse yields the defaults; a record whose
    /// `model` or `messages` came back empty gets those two defaults filled
    /// in, so a reload never lands on a blank form.
    pub fn restore(record: &str) -> Self {
        let mut draft: Self = match serde_json::from_str(record) {
            Ok(draft) => draft,
            Err(_) => return Self::default(),
        };
        if draft.model.is_empty() {
            draft.model = DEFAULT_MODEL.to_string();
        }
        if draft.messages.is_empty() {
            draft.messages = DEFAULT_MESSAGES.to_string();
        }
        draft
    }

    /// The bundled sample request: a forced `generate_questions` call.
    pub fn sample() -> Self {
        Self {
            api_key: "xxx".to_string(),
            model: DEFAULT_MODEL.to_string(),
            messages: SAMPLE_MESSAGES.to_string(),
            functions: SAMPLE_FUNCTIONS.to_string(),
            function_call: r#"{ "name": "generate_questions" }"#.to_string(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::ApiKey => &self.api_key,
            DraftField::Model => &self.model,
            DraftField::Messages => &self.messages,
            DraftField::Functions => &self.functions,
            DraftField::FunctionCall => &self.function_call,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::ApiKey => self.api_key = value,
            DraftField::Model => self.model = value,
            DraftField::Messages => self.messages = value,
            DraftField::Functions => self.functions = value,
            DraftField::FunctionCall => self.function_call = value,
        }
    }
}

/// Addressable draft fields, for field-level updates and repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    ApiKey,
    Model,
    Messages,
    Functions,
    FunctionCall,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_has_starter_conversation() {
        let draft = RequestDraft::default();
        assert_eq!(draft.model, "gpt-4o");
        let messages: serde_json::Value = serde_json::from_str(&draft.messages).unwrap();
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "Hello!");
        assert!(draft.functions.is_empty());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut draft = RequestDraft::default();
        draft.api_key = "sk-test".into();
        draft.function_call = r#"{"name":"f"}"#.into();
        let record = serde_json::to_string(&draft).unwrap();
        assert_eq!(RequestDraft::restore(&record), draft);
    }

    #[test]
    fn test_restore_bad_record_falls_back_to_defaults() {
        assert_eq!(RequestDraft::restore("not json"), RequestDraft::default());
    }

    #[test]
    fn test_restore_fills_empty_model_and_messages() {
        let draft = RequestDraft::restore(r#"{"apiKey":"k","model":"","messages":""}"#);
        assert_eq!(draft.api_key, "k");
        assert_eq!(draft.model, DEFAULT_MODEL);
        assert_eq!(draft.messages, DEFAULT_MESSAGES);
    }

    #[test]
    fn test_record_uses_stored_field_names() {
        let record = serde_json::to_string(&RequestDraft::sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert!(value.get("apiKey").is_some());
        assert!(value.get("function_call").is_some());
    }

    #[test]
    fn test_field_accessors() {
        let mut draft = RequestDraft::default();
        draft.set(DraftField::Model, "gpt-4o-mini".into());
        assert_eq!(draft.get(DraftField::Model), "gpt-4o-mini");
        assert_eq!(draft.get(DraftField::ApiKey), "");
    }
}
