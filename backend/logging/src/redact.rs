//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings prior to logging. Upstream
//! failure messages can quote request headers back at us; they go through
//! here before any log call.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-_]{16,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});

/// Redacts credential patterns in a string.
pub fn redact_credentials(input: &str) -> String {
    API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]").to_string()
}
