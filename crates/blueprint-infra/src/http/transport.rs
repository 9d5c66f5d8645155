//! reqwest-backed [`HttpTransport`].
//!
//! Response bodies are decoded as JSON when possible and kept as text
//! otherwise. Non-2xx statuses are returned as normal responses; only
//! connection, timeout and protocol failures become [`TransportError`]s.

use std::time::Duration;

use blueprint_core::execution::transport::{
    HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use reqwest::Method;
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde_json::{Map, Value};

/// Real HTTP client for module calls.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("blueprint-runner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::new(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            TransportError::new(format!("invalid HTTP method: {}", request.method))
        })?;

        let mut builder = self.client.request(method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // GET and HEAD never carry a body.
        if method != Method::GET && method != Method::HEAD {
            builder = match request.body {
                Some(Value::String(text)) => builder.body(text),
                Some(Value::Null) | None => builder,
                Some(body) => builder.json(&body),
            };
        }

        let response = builder.send().await.map_err(|e| map_error(&request.url, e))?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("failed to read HTTP response body: {e}")))?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        tracing::debug!(url = request.url.as_str(), status, "HTTP transport completed");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Flatten response headers into a JSON map. Repeated headers are joined
/// with `, ` except `set-cookie`, which is always an array.
fn collect_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().unwrap_or("<binary>").to_string())
            .collect();
        let value = if *name == SET_COOKIE {
            Value::Array(values.into_iter().map(Value::String).collect())
        } else {
            Value::String(values.join(", "))
        };
        map.insert(name.as_str().to_string(), value);
    }
    map
}

fn map_error(url: &str, err: reqwest::Error) -> TransportError {
    let message = if err.is_timeout() {
        format!("HTTP request to '{url}' timed out")
    } else if err.is_connect() {
        format!("could not connect to '{url}': {err}")
    } else {
        format!("HTTP request to '{url}' failed: {err}")
    };
    TransportError {
        message,
        status: err.status().map(|s| s.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).unwrap()
    }

    fn request(method: &str, url: String, body: Option<Value>) -> HttpRequest {
        HttpRequest {
            method: method.to_string(),
            url,
            headers: Vec::new(),
            body,
        }
    }

    #[tokio::test]
    async fn test_get_decodes_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 42 })))
            .mount(&server)
            .await;

        let response = transport()
            .send(request("GET", format!("{}/items", server.uri()), Some(json!({ "ignored": true }))))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "count": 42 }));
        assert!(response.headers.contains_key("content-type"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/leads"))
            .and(header("x-source", "blueprint"))
            .and(body_json(json!({ "email": "a@b.c" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "abc" })))
            .expect(1)
            .mount(&server)
            .await;

        let mut req = request("POST", format!("{}/leads", server.uri()), Some(json!({ "email": "a@b.c" })));
        req.headers.push(("x-source".to_string(), "blueprint".to_string()));

        let response = transport().send(req).await.unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, json!({ "id": "abc" }));
    }

    #[tokio::test]
    async fn test_plain_text_body_stays_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello, World!"))
            .mount(&server)
            .await;

        let response = transport().send(request("GET", server.uri(), None)).await.unwrap();
        assert_eq!(response.body, json!("Hello, World!"));
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
            .mount(&server)
            .await;

        let response = transport().send(request("GET", server.uri(), None)).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "boom");
    }

    #[tokio::test]
    async fn test_invalid_method_is_rejected() {
        let err = transport()
            .send(request("NOT A METHOD", "http://localhost".to_string(), None))
            .await
            .unwrap_err();
        assert!(err.message.contains("invalid HTTP method"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .send(request("GET", format!("http://{addr}/"), None))
            .await
            .unwrap_err();
        assert!(err.status.is_none());
        assert!(err.message.contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn test_repeated_headers_are_all_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .append_header("set-cookie", "a=1")
                    .append_header("set-cookie", "b=2")
                    .append_header("x-trace", "one")
                    .append_header("x-trace", "two"),
            )
            .mount(&server)
            .await;

        let response = transport().send(request("GET", server.uri(), None)).await.unwrap();
        assert_eq!(response.headers["set-cookie"], json!(["a=1", "b=2"]));
        assert_eq!(response.headers["x-trace"], json!("one, two"));
    }

    #[tokio::test]
    async fn test_get_sends_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .send(request("GET", server.uri(), Some(json!({ "a": 1 }))))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
    }
}
