use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

mod ai;
mod inspect;
mod routes;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_BIND: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub ai_api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub http: reqwest::Client,
}

impl AppState {
    fn from_env() -> Self {
        Self {
            ai_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("GEOTUTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_url: std::env::var("GEOTUTOR_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/generate", post(routes::generate))
        .route("/api/inspect", post(routes::inspect))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = AppState::from_env();
    if state.ai_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set; /api/generate will answer missing_credential");
    }
    tracing::info!("Using model {}", state.model);

    let bind = std::env::var("GEOTUTOR_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {bind}: {e}");
            return;
        }
    };
    tracing::info!("Server running on http://{bind}");
    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {e}");
    }
}
