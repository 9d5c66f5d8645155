//! Test doubles shared by the execution tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use blueprint_types::blueprint::Module;
use serde_json::{Map, Value, json};

use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// What the mock does when `send` is called.
pub enum MockBehavior {
    Respond(HttpResponse),
    Fail(TransportError),
    Panic,
    Hang,
}

/// In-memory transport that records every request it receives.
pub struct MockTransport {
    behavior: MockBehavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Responds 200 with the given JSON body.
    pub fn ok(body: Value) -> Self {
        let mut headers = Map::new();
        headers.insert("content-type".to_string(), json!("application/json"));
        Self::new(MockBehavior::Respond(HttpResponse {
            status: 200,
            headers,
            body,
        }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match &self.behavior {
            MockBehavior::Respond(response) => Ok(response.clone()),
            MockBehavior::Fail(err) => Err(err.clone()),
            MockBehavior::Panic => panic!("transport exploded"),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::new("unreachable"))
            }
        }
    }
}

/// Build a module from a type identifier and JSON parameters.
pub fn module(id: i64, module_type: &str, parameters: Value) -> Module {
    serde_json::from_value(json!({
        "id": id,
        "label": format!("Module {id}"),
        "module": module_type,
        "parameters": parameters,
    }))
    .unwrap()
}

/// Build a JSON mapping module with the given mapper.
pub fn mapping_module(id: i64, mapper: Value) -> Module {
    let mut module = module(id, "json:TransformToJSON", json!({}));
    module.mapper = Some(mapper);
    module
}
