//! Gateway HTTP server and router.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use remitex_config::Config;
use remitex_core::LlmProvider;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::extract_api;
use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub provider: Arc<dyn LlmProvider>,
    pub config: Arc<Config>,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    Router::new()
        .route(
            "/extract_payment_advice",
            post(extract_api::extract_payment_advice),
        )
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
