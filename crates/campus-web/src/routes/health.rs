//! Liveness and fallback handlers.

use axum::{extract::State, http::StatusCode, http::Uri};
use tracing::debug;

use crate::state::AppState;

/// GET / - Liveness string.
pub async fn index(State(state): State<AppState>) -> String {
    format!("Campus Bridge AI Backend ({}) is running!", state.environment)
}

/// Any unmatched route.
pub async fn not_found(uri: Uri) -> (StatusCode, &'static str) {
    debug!(%uri, "No route matched");
    (StatusCode::NOT_FOUND, "Sorry, can't find that!")
}
