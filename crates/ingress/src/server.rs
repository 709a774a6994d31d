use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::shutdown::Shutdown;
use relay::Relay;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhook", post(handlers::webhook))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Serves on an already bound listener until `shutdown` fires, then drains
/// in-flight requests.
pub async fn serve(
    listener: TcpListener,
    relay: Arc<Relay>,
    shutdown: Shutdown,
) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Ingress listening on {}", local_addr);

    axum::serve(listener, build_router(AppState::new(relay)))
        .with_graceful_shutdown(shutdown.wait())
        .await?;

    info!("Ingress stopped");
    Ok(())
}
