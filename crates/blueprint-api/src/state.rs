//! Application state wiring the dispatcher, runner and explanation settings.
//!
//! The dispatcher and runner are generic over the transport port; AppState
//! pins them to the reqwest implementation.

use std::sync::Arc;
use std::time::Duration;

use blueprint_core::execution::dispatcher::{DispatchSettings, ModuleDispatcher};
use blueprint_core::execution::runner::WorkflowRunner;
use blueprint_infra::http::ReqwestTransport;
use blueprint_types::config::ServiceConfig;
use secrecy::SecretString;

pub type ConcreteDispatcher = ModuleDispatcher<ReqwestTransport>;
pub type ConcreteRunner = WorkflowRunner<ReqwestTransport>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers. Everything inside is
/// immutable after construction, so requests never contend.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub dispatcher: Arc<ConcreteDispatcher>,
    pub runner: Arc<ConcreteRunner>,
    /// Key configured through the environment; requests may supply their own.
    pub api_key: Option<Arc<SecretString>>,
}

impl AppState {
    pub fn new(config: ServiceConfig, api_key: Option<SecretString>) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.http_timeout_secs))?;
        let dispatcher = Arc::new(ModuleDispatcher::new(
            transport,
            DispatchSettings::from_config(&config),
        ));
        let runner = Arc::new(WorkflowRunner::new(Arc::clone(&dispatcher)));

        tracing::debug!(
            base_url = config.base_url.as_str(),
            http_timeout_secs = config.http_timeout_secs,
            api_key_configured = api_key.is_some(),
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            runner,
            api_key: api_key.map(Arc::new),
        })
    }
}
