//! AI analysis route handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use campus_core::analysis::{AnalysisOutcome, AnalysisResult, AnalyzePayload, StatusClass};
use tracing::{debug, info};

use crate::state::AppState;

/// POST /api/ai/analyze - Review, debug or hint on a code snippet.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzePayload>, JsonRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    info!("Received POST /api/ai/analyze");

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected analysis body");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            let error = format!("Invalid request body: {}", rejection.body_text());
            return (status, Json(AnalysisResult::error(error)));
        }
    };

    let outcome = match payload.into_request() {
        Ok(request) => state.gateway.analyze(&request).await,
        Err(e) => {
            debug!(error = %e, "Rejected analysis request");
            AnalysisOutcome::Invalid(e.message())
        }
    };

    (status_code(outcome.status_class()), Json(outcome.into_result()))
}

fn status_code(class: StatusClass) -> StatusCode {
    match class {
        StatusClass::Success => StatusCode::OK,
        StatusClass::ClientError => StatusCode::BAD_REQUEST,
        StatusClass::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
