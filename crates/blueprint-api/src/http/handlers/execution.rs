//! Module and workflow execution handlers.
//!
//! Both routes accept raw JSON and decode the module/blueprint themselves so
//! that shape errors come back as structured 400 responses.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value};

use blueprint_core::blueprint::{blueprint_from_value, module_from_value};
use blueprint_types::execution::{ExecutionResult, WorkflowExecutionResult};

use crate::http::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteModuleRequest {
    #[serde(default)]
    pub module: Option<Value>,
    #[serde(default = "empty_object")]
    pub input_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteWorkflowRequest {
    #[serde(default)]
    pub blueprint: Option<Value>,
    #[serde(default = "empty_object")]
    pub input_data: Value,
}

/// Input used when the request omits `inputData`. An explicit `null` is kept.
fn empty_object() -> Value {
    Value::Object(Map::new())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn execution_routes() -> Router<AppState> {
    Router::new()
        .route("/execute/module", post(execute_module))
        .route("/execute/workflow", post(execute_workflow))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /execute/module - Run a single module against an input payload.
pub async fn execute_module(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteModuleRequest>, JsonRejection>,
) -> Result<Json<ExecutionResult>, AppError> {
    let Json(request) = payload?;
    let raw = request
        .module
        .ok_or_else(|| AppError::Validation("Module data is required".to_string()))?;
    let module = module_from_value(raw)?;

    tracing::info!(
        module_id = module.id,
        label = module.label.as_str(),
        module_type = module.module_type.as_str(),
        "executing module"
    );

    let result = state
        .dispatcher
        .dispatch(&module, &request.input_data)
        .await?;
    Ok(Json(result))
}

/// POST /execute/workflow - Run every module of a blueprint in order.
pub async fn execute_workflow(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteWorkflowRequest>, JsonRejection>,
) -> Result<Json<WorkflowExecutionResult>, AppError> {
    let Json(request) = payload?;
    let raw = request
        .blueprint
        .ok_or_else(|| AppError::Validation("Blueprint with flow is required".to_string()))?;
    let blueprint = blueprint_from_value(raw)?;

    tracing::info!(
        workflow = blueprint.name.as_str(),
        modules = blueprint.flow.len(),
        "executing workflow"
    );

    let result = state
        .runner
        .run(&blueprint, request.input_data)
        .await;
    Ok(Json(result))
}
