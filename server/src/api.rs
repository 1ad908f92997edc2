use axum::{
    extract::{Json, Query, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::docs::generate_docs;
use crate::edits::{load_edit, save_edit};
use crate::error::DocsError;
use crate::types::AppContext;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// CORS layer from the configured origin list. Origins that are not valid
/// header values are dropped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = o.as_str(), "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// All API routes with tracing, compression and CORS applied.
pub fn router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config.allowed_origins);
    Router::new()
        .route("/", get(api_root))
        .route("/health", get(api_health))
        .route("/generate-docs/", post(api_generate_docs))
        .route("/edit-doc/", post(api_save_edit).get(api_load_edit))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(ctx)
}

// ---------------------------------------------------------------------------
// Status endpoints
// ---------------------------------------------------------------------------

pub async fn api_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello! iFixDocs backend is running." }))
}

pub async fn api_health(State(ctx): State<AppContext>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptime_secs": ctx.start_time.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Doc generation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub repo_url: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub status: &'static str,
    pub docs: BTreeMap<String, String>,
}

pub async fn api_generate_docs(
    State(ctx): State<AppContext>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, DocsError> {
    info!(repo_url = body.repo_url.as_str(), "Generating docs");
    let config = ctx.config.clone();

    // Clone + walk + git history: run on the blocking pool
    let docs = tokio::task::spawn_blocking(move || generate_docs(&body.repo_url, &config))
        .await
        .map_err(|e| DocsError::Internal(format!("docs task failed: {e}")))??;

    Ok(Json(GenerateResponse { status: "success", docs }))
}

// ---------------------------------------------------------------------------
// Edited docs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct EditRequest {
    pub file_name: String,
    pub updated_content: String,
}

#[derive(Serialize)]
pub struct EditResponse {
    pub status: &'static str,
    pub path: String,
}

pub async fn api_save_edit(
    State(ctx): State<AppContext>,
    Json(body): Json<EditRequest>,
) -> Result<Json<EditResponse>, DocsError> {
    let path = save_edit(&ctx.config.edits_dir, &body.file_name, &body.updated_content)?;
    Ok(Json(EditResponse { status: "success", path: path.display().to_string() }))
}

#[derive(Deserialize)]
pub struct EditQuery {
    pub file_name: String,
}

#[derive(Serialize)]
pub struct SavedDoc {
    pub file_name: String,
    pub content: String,
}

pub async fn api_load_edit(
    State(ctx): State<AppContext>,
    Query(q): Query<EditQuery>,
) -> Result<Json<SavedDoc>, DocsError> {
    let content = load_edit(&ctx.config.edits_dir, &q.file_name)?;
    Ok(Json(SavedDoc { file_name: q.file_name, content }))
}
