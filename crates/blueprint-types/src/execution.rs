//! Execution result types.
//!
//! `ExecutionResult` is produced once per dispatched module and
//! `WorkflowExecutionResult` once per workflow run. Both are transient: they
//! live only for the duration of a request and are never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::blueprint::Module;

/// Outcome of dispatching a single module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub module_id: i64,
    pub module_name: String,
    pub success: bool,
    /// Output payload; becomes the next module's input on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational text (webhook stub, unsupported module types).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status code, when an HTTP call produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// HTTP response headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
}

impl ExecutionResult {
    /// A successful result carrying `data`.
    pub fn success(module: &Module, data: Value) -> Self {
        Self {
            module_id: module.id,
            module_name: module.label.clone(),
            success: true,
            data: Some(data),
            error: None,
            message: None,
            status: None,
            headers: None,
        }
    }

    /// A failed result carrying an error message.
    pub fn failure(module: &Module, error: impl Into<String>) -> Self {
        Self {
            module_id: module.id,
            module_name: module.label.clone(),
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            status: None,
            headers: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    pub fn with_headers(mut self, headers: Map<String, Value>) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Outcome of running every module of a blueprint in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecutionResult {
    /// True when every recorded module succeeded (an empty flow succeeds).
    pub success: bool,
    pub run_id: Uuid,
    pub workflow_name: String,
    /// One entry per attempted module, in flow order. Modules after the first
    /// failure are not attempted and not recorded.
    pub results: Vec<ExecutionResult>,
    pub execution_time: DateTime<Utc>,
    pub duration_ms: u64,
}

impl WorkflowExecutionResult {
    /// The failed entry that halted the run, if any.
    pub fn failed_module(&self) -> Option<&ExecutionResult> {
        self.results.iter().find(|r| !r.success)
    }
}
