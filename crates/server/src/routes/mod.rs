use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use shared::{GenerateErrorBody, GenerateRequest, Scene};

use crate::ai;
use crate::inspect;
use crate::AppState;

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.model,
        "credential": state.ai_api_key.is_some(),
    }))
}

/// Scene generation endpoint
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Scene>, (StatusCode, Json<GenerateErrorBody>)> {
    tracing::info!(
        "Generate request ({} chars, image: {})",
        request.prompt.chars().count(),
        request.image.is_some()
    );
    match ai::generate_scene(&state, &request).await {
        Ok(scene) => Ok(Json(scene)),
        Err(e) => {
            tracing::error!("Generate error: {}", e);
            let status =
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err((status, Json(e.to_body())))
        }
    }
}

/// Inspect scene → JSON diagnostics
pub async fn inspect(Json(scene): Json<Scene>) -> Json<Value> {
    Json(inspect::inspect_scene(&scene))
}
