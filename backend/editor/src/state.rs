use crate::error::SubmitError;

/// Observable state of the submission pipeline.
///
/// At rest, exactly one of these holds: `loading` is set, `error` is
/// non-empty, `response` is non-empty, or the state is untouched. Every
/// transition that ends a network attempt clears `loading` itself and
/// advances `request_id` exactly once; validation failures touch neither.
///
/// Created fresh per session, never restored from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub loading: bool,
    pub error: String,
    pub response: String,
    pub request_id: u64,
}

impl SubmissionState {
    /// Wipe the previous attempt's outcome at the top of a new one.
    pub(crate) fn clear_outcome(&mut self) {
        self.error.clear();
        self.response.clear();
    }

    /// A validation failure: surfaced, but never a completed attempt.
    pub(crate) fn reject(&mut self, error: &SubmitError) {
        self.error = error.to_string();
    }

    /// The request is on the wire.
    pub(crate) fn begin(&mut self) {
        self.loading = true;
    }

    /// Terminal failure of an issued request.
    pub(crate) fn complete_failure(&mut self, error: &SubmitError) {
        self.error = error.to_string();
        self.loading = false;
        self.request_id += 1;
    }

    /// Terminal success of an issued request.
    pub(crate) fn complete_success(&mut self, response: String) {
        self.response = response;
        self.loading = false;
        self.request_id += 1;
    }
}
