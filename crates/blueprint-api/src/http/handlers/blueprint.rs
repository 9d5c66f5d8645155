//! Blueprint ingestion and explanation handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use blueprint_core::blueprint::{blueprint_from_value, overview};
use blueprint_core::explain::explain_blueprint;
use blueprint_infra::llm::gemini::GeminiClient;
use blueprint_types::blueprint::BlueprintOverview;
use blueprint_types::error::ExplainError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Header a caller can use to supply its own generative API key.
pub const API_KEY_HEADER: &str = "x-api-key";

pub fn blueprint_routes() -> Router<AppState> {
    Router::new()
        .route("/blueprints/inspect", post(inspect_blueprint))
        .route("/blueprints/explain", post(explain))
}

/// POST /blueprints/inspect - Validate a blueprint and list its modules in display order.
pub async fn inspect_blueprint(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BlueprintOverview>, AppError> {
    let Json(raw) = payload?;
    let blueprint = blueprint_from_value(raw)?;
    Ok(Json(overview(&blueprint)))
}

/// POST /blueprints/explain - Ask the generative API to describe a blueprint.
pub async fn explain(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(raw) = payload?;
    let blueprint = blueprint_from_value(raw)?;

    let api_key = request_api_key(&headers)
        .or_else(|| {
            state
                .api_key
                .as_deref()
                .map(|key| SecretString::from(key.expose_secret()))
        })
        .ok_or(ExplainError::NotConfigured)?;

    let client = GeminiClient::new(api_key, &state.config.explain)?;
    let explanation = explain_blueprint(&client, &blueprint).await?;

    Ok(Json(json!({ "success": true, "explanation": explanation })))
}

fn request_api_key(headers: &HeaderMap) -> Option<SecretString> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
