//! Editor-side request composition: the durable draft, its submission state
//! machine, and the client for the local function-call proxy.

pub mod client;
pub mod draft;
pub mod error;
pub mod preview;
pub mod session;
pub mod state;
pub mod storage;

pub use client::ProxyClient;
pub use draft::{DraftField, RequestDraft};
pub use error::SubmitError;
pub use session::EditorSession;
pub use state::SubmissionState;
pub use storage::{DraftStorage, FileDraftStorage, MemoryDraftStorage};
