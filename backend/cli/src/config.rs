use callpad_gateway::DEFAULT_UPSTREAM_URL;

/// Callpad proxy configuration, environment-only (there is no CLI surface).
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Upstream chat-completions base URL
    pub upstream_url: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    /// `PORT` is honored as a fallback for `CALLPAD_PORT`.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("CALLPAD_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("CALLPAD_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            upstream_url: std::env::var("CALLPAD_UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
