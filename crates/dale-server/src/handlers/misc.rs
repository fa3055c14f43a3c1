//! Liveness, landing and static handlers

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::GateError;
use crate::state::AppState;

/// Fallback for every unrouted path.
pub async fn root() -> &'static str {
    "Auth service running"
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /static/auth.png
pub async fn logo(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.logo_path.as_path()).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(err) => {
            tracing::debug!(path = %state.logo_path.display(), error = %err, "logo unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn method_not_allowed() -> GateError {
    GateError::MethodNotAllowed
}
