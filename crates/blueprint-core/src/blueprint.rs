//! Blueprint ingestion: parsing, shape validation, and display ordering.
//!
//! The only schema check in the system happens here: a document must be a JSON
//! object with a string `name` and an array `flow`. Everything else is decoded
//! leniently.

use std::path::Path;

use blueprint_types::blueprint::{Blueprint, BlueprintOverview, Module, ModuleOverview};
use blueprint_types::error::BlueprintError;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a JSON string into a validated `Blueprint`.
pub fn parse_blueprint(json: &str) -> Result<Blueprint, BlueprintError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| BlueprintError::Parse(e.to_string()))?;
    blueprint_from_value(value)
}

/// Validate the top-level shape of a JSON value and decode it.
pub fn blueprint_from_value(value: Value) -> Result<Blueprint, BlueprintError> {
    validate_shape(&value)?;
    serde_json::from_value(value).map_err(|e| BlueprintError::InvalidModule(e.to_string()))
}

/// Decode a single module descriptor.
pub fn module_from_value(value: Value) -> Result<Module, BlueprintError> {
    serde_json::from_value(value).map_err(|e| BlueprintError::InvalidModule(e.to_string()))
}

/// Read and parse a blueprint file from disk.
pub fn load_blueprint_file(path: &Path) -> Result<Blueprint, BlueprintError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| BlueprintError::Io(format!("{}: {e}", path.display())))?;
    parse_blueprint(&content)
}

fn validate_shape(value: &Value) -> Result<(), BlueprintError> {
    let object = value.as_object().ok_or(BlueprintError::InvalidField {
        field: "blueprint",
        expected: "a JSON object",
    })?;

    match object.get("name") {
        None | Some(Value::Null) => return Err(BlueprintError::MissingField("name")),
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        Some(_) => {
            return Err(BlueprintError::InvalidField {
                field: "name",
                expected: "a non-empty string",
            });
        }
    }

    match object.get("flow") {
        None | Some(Value::Null) => Err(BlueprintError::MissingField("flow")),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(BlueprintError::InvalidField {
            field: "flow",
            expected: "an array",
        }),
    }
}

// ---------------------------------------------------------------------------
// Display order
// ---------------------------------------------------------------------------

/// Modules sorted left-to-right by their designer x-coordinate.
///
/// The sort is stable, so modules sharing an x-coordinate keep flow order.
/// This ordering is for display only; execution always follows `flow`.
pub fn display_order(flow: &[Module]) -> Vec<&Module> {
    let mut ordered: Vec<&Module> = flow.iter().collect();
    ordered.sort_by(|a, b| a.position().x.total_cmp(&b.position().x));
    ordered
}

/// Summarize a blueprint for listing: name, module count, modules in display order.
pub fn overview(blueprint: &Blueprint) -> BlueprintOverview {
    BlueprintOverview {
        name: blueprint.name.clone(),
        module_count: blueprint.flow.len(),
        modules: display_order(&blueprint.flow)
            .into_iter()
            .map(ModuleOverview::from)
            .collect(),
    }
}
