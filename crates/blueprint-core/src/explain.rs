//! Blueprint explanation through a text-generation backend.
//!
//! The prompt carries the blueprint name and a reduced view of each module
//! (id, label, type, mapper). Designer metadata and parameters are left out.

use blueprint_types::blueprint::{Blueprint, ModuleSummary};
use blueprint_types::error::ExplainError;
use tracing::{Instrument, info_span};

/// A text-generation backend (Gemini today).
///
/// Implementations live in blueprint-infra.
pub trait TextGenerator: Send + Sync {
    /// Provider name used in tracing spans.
    fn name(&self) -> &str;

    /// Model identifier used in tracing spans.
    fn model(&self) -> &str;

    /// Send a single prompt and return the generated text.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ExplainError>> + Send;
}

/// Build the explanation prompt for a blueprint.
pub fn build_prompt(blueprint: &Blueprint) -> String {
    let steps: Vec<ModuleSummary> = blueprint.flow.iter().map(|m| m.summary()).collect();
    let steps_json = serde_json::to_string_pretty(&steps).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a backend engineer who specializes in API integrations and automation workflows.\n\
         Read the automation blueprint below and explain, step by step, the business logic it implements.\n\
         \n\
         Follow the data: what starts the workflow, which actions run, how values move between modules \
         through their 'mapper' objects, and what the end result is. Write it so another developer \
         could rebuild the same logic in code.\n\
         \n\
         Blueprint name: {name}\n\
         \n\
         Steps:\n\
         {steps_json}\n\
         \n\
         Explanation:\n",
        name = blueprint.name,
    )
}

/// Ask `generator` for a plain-language explanation of `blueprint`.
pub async fn explain_blueprint<G: TextGenerator>(
    generator: &G,
    blueprint: &Blueprint,
) -> Result<String, ExplainError> {
    let prompt = build_prompt(blueprint);
    let span = info_span!(
        "gen_ai.explain",
        gen_ai.system = generator.name(),
        gen_ai.request.model = generator.model(),
        blueprint = blueprint.name.as_str(),
        modules = blueprint.flow.len(),
    );

    let text = generator.generate(&prompt).instrument(span).await?;
    if text.trim().is_empty() {
        return Err(ExplainError::Failed("model returned an empty explanation".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::parse_blueprint;
    use std::sync::Mutex;

    struct MockGenerator {
        reply: Result<String, fn() -> ExplainError>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> ExplainError) -> Self {
            Self {
                reply: Err(err),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for MockGenerator {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-1"
        }

        async fn generate(&self, prompt: &str) -> Result<String, ExplainError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const BLUEPRINT: &str = r#"{
        "name": "Lead Sync",
        "flow": [
            {
                "id": 1,
                "label": "Incoming lead",
                "module": "gateway:CustomWebHook",
                "parameters": { "hook": 99, "secret": "do-not-send" },
                "metadata": { "designer": { "x": 0, "y": 0 } }
            },
            {
                "id": 2,
                "label": "Shape payload",
                "module": "json:TransformToJSON",
                "mapper": { "email": "{{email}}" }
            }
        ]
    }"#;

    #[test]
    fn test_prompt_includes_summaries_only() {
        let bp = parse_blueprint(BLUEPRINT).unwrap();
        let prompt = build_prompt(&bp);

        assert!(prompt.contains("Blueprint name: Lead Sync"));
        assert!(prompt.contains("\"label\": \"Incoming lead\""));
        assert!(prompt.contains("\"module\": \"json:TransformToJSON\""));
        assert!(prompt.contains("{{email}}"));
        assert!(!prompt.contains("do-not-send"));
        assert!(!prompt.contains("designer"));
    }

    #[tokio::test]
    async fn test_explain_returns_generated_text() {
        let bp = parse_blueprint(BLUEPRINT).unwrap();
        let generator = MockGenerator::replying("A webhook receives a lead.");

        let text = explain_blueprint(&generator, &bp).await.unwrap();
        assert_eq!(text, "A webhook receives a lead.");
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explain_propagates_credential_error() {
        let bp = parse_blueprint(BLUEPRINT).unwrap();
        let generator = MockGenerator::failing(|| ExplainError::InvalidCredential);

        let err = explain_blueprint(&generator, &bp).await.unwrap_err();
        assert!(matches!(err, ExplainError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_blank_reply_is_a_failure() {
        let bp = parse_blueprint(BLUEPRINT).unwrap();
        let generator = MockGenerator::replying("   ");

        let err = explain_blueprint(&generator, &bp).await.unwrap_err();
        assert!(matches!(err, ExplainError::Failed(_)));
    }
}
