//! Sequential workflow runner.
//!
//! Modules run one at a time in flow order. Each successful module's `data`
//! becomes the next module's input. The first failure halts the run: the
//! failing module is recorded and nothing after it is attempted.

use std::sync::Arc;
use std::time::Instant;

use blueprint_types::blueprint::Blueprint;
use blueprint_types::execution::{ExecutionResult, WorkflowExecutionResult};
use chrono::Utc;
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::dispatcher::ModuleDispatcher;
use super::transport::HttpTransport;

/// Runs every module of a blueprint through a shared dispatcher.
pub struct WorkflowRunner<T: HttpTransport> {
    dispatcher: Arc<ModuleDispatcher<T>>,
}

impl<T: HttpTransport> WorkflowRunner<T> {
    pub fn new(dispatcher: Arc<ModuleDispatcher<T>>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<ModuleDispatcher<T>> {
        &self.dispatcher
    }

    /// Execute the blueprint's flow, starting from `initial_input`.
    pub async fn run(&self, blueprint: &Blueprint, initial_input: Value) -> WorkflowExecutionResult {
        let run_id = Uuid::now_v7();
        let span = info_span!(
            "workflow.run",
            run_id = %run_id,
            workflow = blueprint.name.as_str(),
            modules = blueprint.flow.len(),
        );

        self.run_flow(run_id, blueprint, initial_input)
            .instrument(span)
            .await
    }

    async fn run_flow(
        &self,
        run_id: Uuid,
        blueprint: &Blueprint,
        initial_input: Value,
    ) -> WorkflowExecutionResult {
        let started = Instant::now();
        let mut results = Vec::with_capacity(blueprint.flow.len());
        let mut current = initial_input;
        let mut success = true;

        for module in &blueprint.flow {
            let result = match self.dispatcher.dispatch(module, &current).await {
                Ok(result) => result,
                Err(err) => ExecutionResult::failure(module, err.to_string()),
            };

            if !result.success {
                warn!(
                    module_id = module.id,
                    error = result.error.as_deref().unwrap_or_default(),
                    "module failed, halting workflow"
                );
                results.push(result);
                success = false;
                break;
            }

            current = result.data.clone().unwrap_or(Value::Null);
            results.push(result);
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(success, executed = results.len(), duration_ms, "workflow finished");

        WorkflowExecutionResult {
            success,
            run_id,
            workflow_name: blueprint.name.clone(),
            results,
            execution_time: Utc::now(),
            duration_ms,
        }
    }
}
