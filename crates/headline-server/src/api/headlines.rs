use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use headline_sentiment::Label;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::AppState;

const PROCESSING_ERROR: &str = "An error occurred during processing.";

#[derive(Debug, Deserialize)]
pub(super) struct ScoreHeadlinesRequest {
    pub headlines: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScoreHeadlinesResponse {
    pub labels: Vec<Label>,
}

/// Scoring failure as seen by API clients.
///
/// Rendered with a 200 status and a generic message; the cause is only logged.
#[derive(Debug, Serialize)]
pub(super) struct ProcessingError {
    pub error: &'static str,
}

impl IntoResponse for ProcessingError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub(super) async fn score_headlines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScoreHeadlinesRequest>,
) -> Result<Json<ScoreHeadlinesResponse>, ProcessingError> {
    tracing::info!(
        request_id = %req_id.0,
        count = body.headlines.len(),
        "received request to score headlines"
    );
    tracing::debug!(request_id = %req_id.0, headlines = ?body.headlines, "headlines content");

    match state.scorer.label(&body.headlines).await {
        Ok(labels) => {
            tracing::info!(request_id = %req_id.0, "prediction successful");
            Ok(Json(ScoreHeadlinesResponse { labels }))
        }
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "error during prediction");
            Err(ProcessingError {
                error: PROCESSING_ERROR,
            })
        }
    }
}
