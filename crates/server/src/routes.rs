//! HTTP routes.
//!
//! - `POST /api/blogs/process` `{url}` → `{blog, translation, message}`
//! - `GET /api/blogs/{id}` → blog with translation
//! - `GET /api/translations/recent?limit=N` → newest translations first; `N` is
//!   read from its leading digits
//! - `GET /health` → `{status: "ok"}`

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use blogurdu_core::{BlogWithTranslation, Error};
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::service::{BlogService, ProcessOutcome};

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<String>,
}

/// Build the application router.
pub fn router(service: BlogService) -> Router {
    let api = Router::new()
        .route("/blogs/process", post(process_blog))
        .route("/blogs/:id", get(get_blog))
        .route("/translations/recent", get(recent_translations));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn process_blog(
    State(service): State<BlogService>, payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessOutcome>, ApiError> {
    let context = "Failed to process blog";
    let Json(request) = payload.map_err(|e| ApiError::new(context, Error::InvalidUrl(e.body_text())))?;

    service
        .process(&request.url)
        .await
        .map(Json)
        .map_err(ApiError::with(context))
}

async fn get_blog(
    State(service): State<BlogService>, Path(id): Path<String>,
) -> Result<Json<BlogWithTranslation>, ApiError> {
    let context = "Failed to fetch blog";
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::new(context, Error::BlogNotFound(id.clone())))?;

    service.blog(id).await.map(Json).map_err(ApiError::with(context))
}

async fn recent_translations(
    State(service): State<BlogService>, Query(params): Query<RecentParams>,
) -> Result<Json<Vec<BlogWithTranslation>>, ApiError> {
    let limit = params.limit.as_deref().and_then(leading_int);

    service
        .recent(limit)
        .await
        .map(Json)
        .map_err(ApiError::with("Failed to fetch recent translations"))
}

/// Integer prefix of `raw` after leading whitespace: `"5abc"` is 5, `"abc"` is None.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let sign = raw.len() - unsigned.len();
    raw[..sign + digits].parse().ok()
}
