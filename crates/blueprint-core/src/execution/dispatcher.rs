//! Module dispatcher.
//!
//! `ModuleDispatcher` classifies a module into a [`ModuleKind`] and invokes
//! exactly one handler. Handler-local failures come back as ordinary
//! `success: false` results; a handler that panics is caught here and
//! surfaced as a [`DispatchError`].

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use blueprint_types::blueprint::{Module, ModuleKind};
use blueprint_types::config::ServiceConfig;
use blueprint_types::execution::ExecutionResult;
use futures_util::FutureExt;
use serde_json::Value;

use super::http::{DEFAULT_HTTP_TIMEOUT, HttpCallHandler};
use super::mapping;
use super::transport::HttpTransport;
use super::webhook::WebhookStub;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Static settings shared by every dispatch.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Base URL used to build webhook callback URLs.
    pub webhook_base_url: String,
    /// Timeout applied to HTTP module calls.
    pub http_timeout: Duration,
}

impl DispatchSettings {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            webhook_base_url: config.base_url.clone(),
            http_timeout: Duration::from_secs(config.http_timeout_secs),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            webhook_base_url: ServiceConfig::default().base_url,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Unexpected failures while dispatching a module.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A handler panicked.
    #[error("module {module_id} handler crashed: {message}")]
    HandlerPanicked { module_id: i64, message: String },
}

impl DispatchError {
    pub fn module_id(&self) -> i64 {
        match self {
            DispatchError::HandlerPanicked { module_id, .. } => *module_id,
        }
    }
}

// ---------------------------------------------------------------------------
// ModuleDispatcher
// ---------------------------------------------------------------------------

/// Routes modules to the HTTP, JSON mapping, or webhook handler.
pub struct ModuleDispatcher<T: HttpTransport> {
    http: HttpCallHandler<T>,
    webhook: WebhookStub,
}

impl<T: HttpTransport> ModuleDispatcher<T> {
    pub fn new(transport: T, settings: DispatchSettings) -> Self {
        Self {
            http: HttpCallHandler::new(transport, settings.http_timeout),
            webhook: WebhookStub::new(settings.webhook_base_url),
        }
    }

    pub fn transport(&self) -> &T {
        self.http.transport()
    }

    /// Execute one module against `input`.
    pub async fn dispatch(
        &self,
        module: &Module,
        input: &Value,
    ) -> Result<ExecutionResult, DispatchError> {
        let kind = module.kind();
        tracing::debug!(
            module_id = module.id,
            module_type = module.module_type.as_str(),
            kind = %kind,
            "dispatching module"
        );

        AssertUnwindSafe(self.invoke(kind, module, input))
            .catch_unwind()
            .await
            .map_err(|payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!(module_id = module.id, error = message.as_str(), "module handler panicked");
                DispatchError::HandlerPanicked {
                    module_id: module.id,
                    message,
                }
            })
    }

    async fn invoke(&self, kind: ModuleKind, module: &Module, input: &Value) -> ExecutionResult {
        match kind {
            ModuleKind::Http => self.http.execute(module, input).await,
            ModuleKind::Json => mapping::execute(module, input),
            ModuleKind::Webhook => self.webhook.execute(module),
            ModuleKind::Unsupported => ExecutionResult::success(module, input.clone())
                .with_message(format!(
                    "Module type '{}' is not yet supported for execution",
                    module.module_type
                )),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
