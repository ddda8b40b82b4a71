mod config;

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use callpad_gateway::{GatewayState, UpstreamClient, start_server};
use callpad_logging::init_logger;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logger(&config.log_level, None);
    info!(upstream = %config.upstream_url, "Starting Callpad proxy");

    let upstream = UpstreamClient::new().with_base_url(config.upstream_url.clone());
    let state = GatewayState::new(upstream);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
