//! Occurra Web Server
//!
//! Run with: cargo run -p occurra-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Occurra Web Server...");

    let config = occurra_config::Config::load()?;
    let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
    let state = occurra_web::state::AppState::new(config)?;

    occurra_web::serve(state, addr).await
}
