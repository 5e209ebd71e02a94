mod headlines;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Json, Router,
};
use headline_sentiment::Scorer;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

/// Shared handler state. The scorer is loaded once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<Scorer>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct StatusData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/score_headlines", post(headlines::score_headlines))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Liveness probe. Reaching this handler implies the models loaded.
async fn status() -> Json<StatusData> {
    tracing::info!("status check endpoint called");
    Json(StatusData { status: "OK" })
}
