use thiserror::Error;

/// Failure taxonomy for a submission attempt.
///
/// The Display text of each variant is the exact string surfaced in
/// [`crate::SubmissionState::error`]. The first four are local validation
/// failures resolved before any network call; the last two are terminal
/// outcomes of an issued request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Messages must be valid JSON.")]
    InvalidMessages,

    #[error("Model and messages are required.")]
    MissingModelOrMessages,

    #[error("Functions must be valid JSON.")]
    InvalidFunctions,

    #[error("Function Call must be valid JSON.")]
    InvalidFunctionCall,

    /// The proxy was unreachable, or its body could not be read as JSON.
    #[error("Network or server error.")]
    Transport,

    /// The proxy answered with a structured error body; the message is
    /// relayed verbatim.
    #[error("{0}")]
    Gateway(String),
}
