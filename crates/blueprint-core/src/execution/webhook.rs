//! Webhook trigger stub.
//!
//! A webhook module can only run when an external caller hits its URL, so
//! executing one performs no I/O: it reports the callback URL it would listen
//! on and echoes the configured parameters.

use blueprint_types::blueprint::Module;
use blueprint_types::execution::ExecutionResult;
use serde_json::{Value, json};

pub const WEBHOOK_MESSAGE: &str =
    "Webhook module configured (execution would require external trigger)";

/// Builds callback URLs under a public base URL.
#[derive(Debug, Clone)]
pub struct WebhookStub {
    base_url: String,
}

impl WebhookStub {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn callback_url(&self, module_id: i64) -> String {
        format!("{}/webhook/{}", self.base_url, module_id)
    }

    pub fn execute(&self, module: &Module) -> ExecutionResult {
        let data = json!({
            "webhookUrl": self.callback_url(module.id),
            "method": "POST",
            "parameters": Value::Object(module.parameters.clone()),
        });
        ExecutionResult::success(module, data).with_message(WEBHOOK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::testing::module;

    #[test]
    fn test_webhook_for_module_42() {
        let stub = WebhookStub::new("http://localhost:3001");
        let m = module(42, "gateway:CustomWebHook", json!({ "hook": 1187 }));

        let result = stub.execute(&m);
        assert!(result.success);
        assert_eq!(result.message.as_deref(), Some(WEBHOOK_MESSAGE));

        let data = result.data.unwrap();
        assert!(data["webhookUrl"].as_str().unwrap().ends_with("/webhook/42"));
        assert_eq!(data["method"], "POST");
        assert_eq!(data["parameters"], json!({ "hook": 1187 }));
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let stub = WebhookStub::new("https://hooks.example.com/");
        assert_eq!(stub.callback_url(7), "https://hooks.example.com/webhook/7");
    }
}
