//! `bprint explain`: print a plain-language explanation of a blueprint.

use std::path::Path;

use anyhow::Result;
use console::style;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use blueprint_core::blueprint::load_blueprint_file;
use blueprint_core::explain::explain_blueprint;
use blueprint_infra::llm::gemini::GeminiClient;
use blueprint_types::error::ExplainError;

use crate::state::AppState;

pub async fn explain(state: &AppState, file: &Path, api_key: Option<String>, json: bool) -> Result<()> {
    let blueprint = load_blueprint_file(file)?;

    let key = api_key
        .filter(|k| !k.trim().is_empty())
        .map(SecretString::from)
        .or_else(|| {
            state
                .api_key
                .as_deref()
                .map(|key| SecretString::from(key.expose_secret()))
        })
        .ok_or(ExplainError::NotConfigured)?;

    let client = GeminiClient::new(key, &state.config.explain)?;
    let explanation = explain_blueprint(&client, &blueprint).await?;

    if json {
        let body = json!({ "success": true, "explanation": explanation });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!();
        println!("  {} {}", style("Blueprint:").bold(), style(&blueprint.name).cyan());
        println!();
        println!("{explanation}");
        println!();
    }
    Ok(())
}
