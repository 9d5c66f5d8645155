//! HTTP call handler.
//!
//! Reads `url`, `method`, `headers` and `data` (alias `body`) from the module
//! parameters, sends the request through an [`HttpTransport`] under a fixed
//! timeout, and normalizes the outcome. Any response, including non-2xx, is a
//! success; only transport-level failures produce `success: false`.

use std::time::Duration;

use blueprint_types::blueprint::Module;
use blueprint_types::execution::ExecutionResult;
use serde_json::{Map, Value};

use super::transport::{HttpRequest, HttpTransport};

/// Fixed timeout applied to every HTTP module call.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Error reported when a module has no usable `url` parameter.
pub const MISSING_URL_ERROR: &str = "HTTP module requires a URL parameter";

/// Executes HTTP modules through an injected transport.
pub struct HttpCallHandler<T: HttpTransport> {
    transport: T,
    timeout: Duration,
}

impl<T: HttpTransport> HttpCallHandler<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run an HTTP module against the current input payload.
    pub async fn execute(&self, module: &Module, input: &Value) -> ExecutionResult {
        let request = match build_request(&module.parameters, input) {
            Ok(request) => request,
            Err(message) => {
                tracing::warn!(module_id = module.id, "{message}");
                return ExecutionResult::failure(module, message);
            }
        };

        tracing::debug!(
            module_id = module.id,
            method = request.method.as_str(),
            url = request.url.as_str(),
            "sending HTTP module request"
        );

        match tokio::time::timeout(self.timeout, self.transport.send(request)).await {
            Ok(Ok(response)) => {
                tracing::info!(module_id = module.id, status = response.status, "HTTP module completed");
                ExecutionResult::success(module, response.body)
                    .with_status(Some(response.status))
                    .with_headers(response.headers)
            }
            Ok(Err(err)) => {
                tracing::warn!(module_id = module.id, error = %err, "HTTP module request failed");
                ExecutionResult::failure(module, err.message).with_status(err.status)
            }
            Err(_elapsed) => {
                tracing::warn!(module_id = module.id, timeout_secs = self.timeout.as_secs(), "HTTP module timed out");
                ExecutionResult::failure(
                    module,
                    format!("HTTP request timed out after {}ms", self.timeout.as_millis()),
                )
            }
        }
    }
}

/// Resolve a module's parameters into a request.
///
/// The static `data`/`body` parameter wins; otherwise the current input
/// payload is sent as the body.
pub fn build_request(parameters: &Map<String, Value>, input: &Value) -> Result<HttpRequest, String> {
    let url = parameters
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| MISSING_URL_ERROR.to_string())?;

    let method = parameters
        .get("method")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|method| !method.is_empty())
        .unwrap_or("GET")
        .to_uppercase();

    let headers = parameters.get("headers").map(parse_headers).unwrap_or_default();

    let body = parameters
        .get("data")
        .or_else(|| parameters.get("body"))
        .filter(|body| !body.is_null())
        .cloned()
        .unwrap_or_else(|| input.clone());

    Ok(HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body: Some(body),
    })
}

/// Accepts either `{"Name": "value"}` or the exported `[{"name", "value"}]` list.
fn parse_headers(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), header_value(value)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let name = item.get("name").or_else(|| item.get("key"))?.as_str()?;
                let value = item.get("value").map(header_value).unwrap_or_default();
                Some((name.to_string(), value))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn header_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
