//! `bprint run`: execute a blueprint file from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::{Map, Value};

use blueprint_core::blueprint::load_blueprint_file;
use blueprint_types::execution::{ExecutionResult, WorkflowExecutionResult};

use crate::state::AppState;

/// Run the blueprint and print the results. Returns whether the run succeeded.
pub async fn run_blueprint(
    state: &AppState,
    file: &Path,
    input: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<bool> {
    let blueprint = load_blueprint_file(file)?;
    let initial = parse_input(input)?;

    let result = state.runner.run(&blueprint, initial).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !quiet {
        print_result(&result);
    }

    Ok(result.success)
}

fn parse_input(input: Option<&str>) -> Result<Value> {
    match input {
        Some(raw) => serde_json::from_str(raw).context("--input must be valid JSON"),
        None => Ok(Value::Object(Map::new())),
    }
}

fn print_result(result: &WorkflowExecutionResult) {
    println!();
    println!(
        "  {} {}",
        style("Workflow:").bold(),
        style(&result.workflow_name).cyan()
    );
    println!();

    if result.results.is_empty() {
        println!("  {} Blueprint has no modules.", style("i").blue().bold());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Module").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Output").fg(Color::White),
    ]);

    for entry in &result.results {
        let status = if entry.success {
            Cell::new("✓ ok").fg(Color::Green)
        } else {
            Cell::new("✗ failed").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(entry.module_id),
            Cell::new(&entry.module_name).fg(Color::Cyan),
            status,
            Cell::new(output_summary(entry)),
        ]);
    }

    println!("{table}");
    println!();

    if result.success {
        println!(
            "  {} Completed {} module(s) in {}ms",
            style("✓").green().bold(),
            result.results.len(),
            result.duration_ms
        );
    } else {
        println!(
            "  {} Halted at module {}",
            style("✗").red().bold(),
            result
                .failed_module()
                .map(|m| m.module_id.to_string())
                .unwrap_or_default()
        );
    }
    println!("  {}", style(format!("run {}", result.run_id)).dim());
    println!();
}

/// One-line description of a module outcome for the table.
fn output_summary(entry: &ExecutionResult) -> String {
    if let Some(error) = &entry.error {
        return error.clone();
    }
    let mut text = match (&entry.message, &entry.data) {
        (Some(message), _) => message.clone(),
        (None, Some(data)) => data.to_string(),
        (None, None) => String::new(),
    };
    if let Some(status) = entry.status {
        text = format!("HTTP {status} {text}");
    }
    truncate(&text, 80)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}
