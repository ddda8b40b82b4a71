use thiserror::Error;

/// Failure of the JSON repair engine.
///
/// The Display text is the exact string surfaced to the user next to the
/// field that failed to repair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("Invalid JSON/object syntax.")]
    Syntax,
}
