use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use callpad_core::{repair, ChatCompletionPayload};

use crate::client::ProxyClient;
use crate::draft::{DraftField, RequestDraft};
use crate::error::SubmitError;
use crate::state::SubmissionState;
use crate::storage::DraftStorage;

/// One editing session: the draft, its derived submission state, and the
/// plumbing to persist and submit it.
///
/// `submit` is the only path that mutates [`SubmissionState`]. There is no
/// queue or lock around it; the presentation layer disables its submit
/// control while `loading` is set, and that is the sole concurrency guard.
pub struct EditorSession<S: DraftStorage> {
    storage: S,
    client: ProxyClient,
    pub draft: RequestDraft,
    pub state: SubmissionState,
    field_errors: HashMap<DraftField, String>,
}

impl<S: DraftStorage> EditorSession<S> {
    /// Restore the draft from storage; a missing or unreadable record means
    /// defaults, never an error.
    pub async fn load(storage: S, client: ProxyClient) -> Self {
        let draft = match storage.load().await {
            Ok(Some(record)) => RequestDraft::restore(&record),
            Ok(None) => RequestDraft::default(),
            Err(err) => {
                warn!(error = %err, "Failed to read draft record; starting from defaults");
                RequestDraft::default()
            }
        };
        Self {
            storage,
            client,
            draft,
            state: SubmissionState::default(),
            field_errors: HashMap::new(),
        }
    }

    /// Update one field in memory. Persistence is batched at submit time.
    pub fn update(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Replace the whole draft with the bundled sample request.
    pub fn fill_sample(&mut self) {
        self.draft = RequestDraft::sample();
    }

    /// Run the repair engine over a JSON field in place.
    ///
    /// On success the field is rewritten with the corrected text and its
    /// repair error cleared; on failure the field is left untouched and the
    /// error recorded against it.
    pub fn fix_field(&mut self, field: DraftField) {
        match repair(self.draft.get(field)) {
            Ok(corrected) => {
                self.draft.set(field, corrected);
                self.field_errors.remove(&field);
            }
            Err(err) => {
                self.field_errors.insert(field, err.to_string());
            }
        }
    }

    /// Repair error recorded against a field, if any.
    pub fn field_error(&self, field: DraftField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// Validate the draft, and if it holds together, submit it through the
    /// proxy. All observable effects land on [`Self::state`].
    pub async fn submit(&mut self) {
        // The latest edits must survive a reload no matter how this attempt
        // ends, so the draft is persisted before anything can fail.
        match serde_json::to_string(&self.draft) {
            Ok(record) => {
                if let Err(err) = self.storage.save(&record).await {
                    warn!(error = %err, "Failed to persist draft record");
                }
            }
            Err(err) => warn!(error = %err, "Failed to serialize draft record"),
        }

        self.state.clear_outcome();

        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(err) => {
                debug!(error = %err, "Draft rejected before submission");
                self.state.reject(&err);
                return;
            }
        };

        self.state.begin();
        match self.client.call(&self.draft.api_key, &payload).await {
            Ok(body) => {
                let pretty = serde_json::to_string_pretty(&body)
                    .expect("Value serialization is infallible");
                self.state.complete_success(pretty);
            }
            Err(err) => {
                debug!(error = %err, "Submission failed");
                self.state.complete_failure(&err);
            }
        }
    }

    /// Parse the draft's JSON fields into the wire payload.
    ///
    /// Empty messages text and a parsed JSON `null` both count as missing;
    /// anything else that parses is passed through untouched.
    fn build_payload(&self) -> Result<ChatCompletionPayload, SubmitError> {
        let messages: Value = if self.draft.messages.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.draft.messages).map_err(|_| SubmitError::InvalidMessages)?
        };

        if self.draft.model.is_empty() || messages.is_null() {
            return Err(SubmitError::MissingModelOrMessages);
        }

        let mut payload = ChatCompletionPayload::new(&self.draft.model, messages);
        if !self.draft.functions.is_empty() {
            payload.functions = Some(
                serde_json::from_str(&self.draft.functions)
                    .map_err(|_| SubmitError::InvalidFunctions)?,
            );
        }
        if !self.draft.function_call.is_empty() {
            payload.function_call = Some(
                serde_json::from_str(&self.draft.function_call)
                    .map_err(|_| SubmitError::InvalidFunctionCall)?,
            );
        }
        Ok(payload)
    }
}
