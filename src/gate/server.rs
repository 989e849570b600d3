//! Gateway HTTP server

use crate::gate::config::GatewayConfig;
use crate::gate::handlers::{self, GatewayState};
use crate::{create_client, DemoModePolicy, ProviderConfig, ResearchService};
use anyhow::Context;
use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Start the gateway server
pub async fn start_server(config: GatewayConfig, provider: ProviderConfig) -> anyhow::Result<()> {
    let provider = provider.with_timeout_secs(config.timeout_secs);
    let client = create_client(provider)?;
    let policy = DemoModePolicy::from_enabled(config.demo_mode);
    let state = GatewayState::new(ResearchService::new(client, policy));

    let app = build_router(state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.bind_addr()))?;

    info!(
        "Starting research gateway on http://{} (demo mode {})",
        addr,
        if policy.is_enabled() { "on" } else { "off" }
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

/// Build the application router
///
/// Research routes are served both at the root and under `/api`, the prefix
/// the front-end calls.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .merge(research_routes())
        .nest("/api", research_routes())
        .route("/health", get(health_check))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
}

fn research_routes() -> Router<GatewayState> {
    Router::new()
        .route("/summarize/", post(handlers::summarize))
        .route("/insights/", post(handlers::insights))
        .route("/search/", post(handlers::search))
        .route("/chat/", post(handlers::chat))
        .route("/research-readiness/", post(handlers::research_readiness))
}

/// Health check handler
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Logging middleware
async fn logging_middleware(req: Request, next: Next) -> axum::response::Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(%request_id, "{} {} {} {:?}", method, uri, status, duration);
    } else {
        info!(%request_id, "{} {} {} {:?}", method, uri, status, duration);
    }

    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
