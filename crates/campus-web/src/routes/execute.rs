//! Code execution forwarder.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use campus_clients::execution::{ExecutionError, ExecutionReport, ExecutionRequest};
use tracing::{error, info};

use crate::state::AppState;

/// POST /api/execute - Relay a run request to the external runner.
pub async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<ExecutionRequest>, JsonRejection>,
) -> (StatusCode, Json<ExecutionReport>) {
    info!("Received POST /api/execute");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ExecutionReport::failure(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    if let Err(e) = request.validate() {
        return (StatusCode::BAD_REQUEST, Json(ExecutionReport::failure(e.to_string())));
    }

    let Some(executor) = &state.executor else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ExecutionReport::failure(ExecutionError::NotConfigured.to_string())),
        );
    };

    match executor.execute(&request).await {
        Ok(report) => (StatusCode::OK, Json(report)),
        Err(e) => {
            error!(error = %e, url = %executor.url(), "Code execution call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExecutionReport::failure(format!(
                    "Code execution failed on server: {}",
                    e
                ))),
            )
        }
    }
}
