use std::any::Any;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::models::SignalPayload;
use serde_json::{Value, json};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::IngressError;
use crate::server::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Validates the posted signal and pushes it downstream before answering.
#[instrument(name = "webhook", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Response {
    match relay_signal(&state, &body).await {
        Ok(()) => Json(json!({ "status": "received" })).into_response(),
        Err(e) => {
            e.log();
            e.into_response()
        }
    }
}

async fn relay_signal(state: &AppState, body: &[u8]) -> Result<(), IngressError> {
    let payload = SignalPayload::parse(body)?;
    let frame = payload.to_frame()?;

    info!("Received payload: {}", frame);
    state.relay.send(&frame).await?;
    info!("Relayed signal: {}", frame);

    Ok(())
}

/// Turns a handler panic into the same 500 body as any other internal failure.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Error processing request: {}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
