use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::models::PayloadError;
use relay::RelayError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Everything that can end a webhook call early.
#[derive(Error, Debug)]
pub enum IngressError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IngressError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::Encode(_) | Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client mistakes are warnings, the rest are errors.
    pub fn log(&self) {
        match self {
            Self::Payload(PayloadError::MissingFields { missing, payload }) => {
                warn!("Missing fields {:?} in payload: {}", missing, payload);
            }
            Self::Payload(PayloadError::InvalidJson) => {
                warn!("Rejected webhook body: not a JSON object");
            }
            other => error!("Error processing webhook: {}", other),
        }
    }
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
