//! Callpad Gateway HTTP server.
//!
//! The single external-facing endpoint: validates an incoming function-call
//! request and relays it, credential attached, to the upstream
//! chat-completions API. No persistence, no rate limiting, one upstream
//! attempt per request.

pub mod function_call;
pub mod health;
pub mod server;
pub mod upstream;

pub use server::{GatewayState, build_router, start_server};
pub use upstream::{DEFAULT_UPSTREAM_URL, UpstreamClient};
