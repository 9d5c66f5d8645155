//! Outbound HTTP port.
//!
//! The HTTP module handler builds an [`HttpRequest`] and hands it to an
//! [`HttpTransport`]. The concrete reqwest-backed transport lives in
//! blueprint-infra; tests use an in-memory mock.

use serde_json::{Map, Value};

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Upper-cased method name (`GET`, `POST`, ...).
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, defaulting to the module input. GET and HEAD requests are
    /// sent without it; a string is sent raw, anything else as JSON.
    pub body: Option<Value>,
}

/// A response of any status. Non-2xx responses are not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Map<String, Value>,
    /// Parsed JSON when the body is JSON, otherwise the raw text as a string.
    pub body: Value,
}

/// Transport-level failure (DNS, connect, timeout, invalid request).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    /// Status code, when the failure happened after a response started.
    pub status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

/// Sends HTTP requests on behalf of the HTTP module handler.
///
/// Uses RPITIT for the async method, matching the other ports in this crate.
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}
