//! Structured logging for Callpad.
//!
//! Console + rolling NDJSON file output, and credential redaction so an API
//! key never lands in a log line.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_credentials;
