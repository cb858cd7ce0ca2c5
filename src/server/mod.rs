use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::advisor::CorrectionAdvisor;
use crate::error::ApiError;
use crate::models::{CorrectionRequest, CorrectionResult};

/// Builds the application router with permissive CORS for web clients.
pub fn router(advisor: Arc<CorrectionAdvisor>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/correct", post(correct))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(advisor)
}

async fn home() -> Json<Value> {
    Json(json!({"message": "Grammar Tutor API running locally! 🚀"}))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "grammar_correction"}))
}

/// Correction endpoint. Always answers 200 with a well-formed result for any
/// parseable request body; only an unreadable body gets a 4xx.
async fn correct(
    State(advisor): State<Arc<CorrectionAdvisor>>,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<CorrectionResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    info!("Correcting ({}): '{}'", request.difficulty, request.text);
    Ok(Json(advisor.correct(&request.text, request.difficulty).await))
}
