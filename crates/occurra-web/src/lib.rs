//! occurra-web — Web dashboard for Occurra
//! Provides an occurrence explorer with:
//!   - Search controls (species, record limit, year range, bounding box)
//!   - Map, table and chart tabs
//!   - CSV download of the full result
//!   - JSON endpoints for records and summary counts

pub mod router;
pub mod handlers;
pub mod state;
pub mod render;

use std::net::SocketAddr;
use tracing::info;

/// Bind `addr` and serve the dashboard until the process exits.
pub async fn serve(state: state::AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router::build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
