//! JSON mapping handler and the `{{variable}}` template syntax.
//!
//! A mapper value of the exact form `{{name}}` is replaced by `input[name]`.
//! Anything else -- literals, numbers, nested objects, strings with extra
//! text around the braces -- passes through unchanged. Unresolved templates
//! are kept literally, braces included.

use blueprint_types::blueprint::Module;
use blueprint_types::execution::ExecutionResult;
use serde_json::{Map, Value};

/// Extract the variable name from a `{{name}}` template.
///
/// Whitespace inside the braces is ignored. Returns `None` for anything that
/// is not a single flat reference (empty names, nested braces).
pub fn template_variable(template: &str) -> Option<&str> {
    let name = template.strip_prefix("{{")?.strip_suffix("}}")?.trim();
    if name.is_empty() || name.contains(['{', '}']) {
        return None;
    }
    Some(name)
}

/// Resolve every entry of a flat mapper against `input`.
pub fn resolve_mapper(mapper: &Map<String, Value>, input: &Value) -> Map<String, Value> {
    mapper
        .iter()
        .map(|(key, mapping)| (key.clone(), resolve_value(mapping, input)))
        .collect()
}

fn resolve_value(mapping: &Value, input: &Value) -> Value {
    let Value::String(template) = mapping else {
        return mapping.clone();
    };

    template_variable(template)
        .and_then(|name| input.as_object()?.get(name))
        .cloned()
        .unwrap_or_else(|| mapping.clone())
}

/// Run a JSON mapping module.
///
/// A missing or null mapper produces an empty object. A mapper that is not an
/// object is the only failure case.
pub fn execute(module: &Module, input: &Value) -> ExecutionResult {
    match &module.mapper {
        None | Some(Value::Null) => ExecutionResult::success(module, Value::Object(Map::new())),
        Some(Value::Object(mapper)) => {
            let resolved = resolve_mapper(mapper, input);
            tracing::debug!(module_id = module.id, keys = resolved.len(), "JSON mapping applied");
            ExecutionResult::success(module, Value::Object(resolved))
        }
        Some(other) => ExecutionResult::failure(
            module,
            format!("JSON module mapper must be an object, got {}", json_type(other)),
        ),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::testing::mapping_module;
    use serde_json::json;

    #[test]
    fn test_template_variable_forms() {
        assert_eq!(template_variable("{{in}}"), Some("in"));
        assert_eq!(template_variable("{{ in }}"), Some("in"));
        assert_eq!(template_variable("{{}}"), None);
        assert_eq!(template_variable("{{a}} and {{b}}"), None);
        assert_eq!(template_variable("{{ {{nested}} }}"), None);
        assert_eq!(template_variable("prefix {{in}}"), None);
        assert_eq!(template_variable("{in}"), None);
    }

    #[test]
    fn test_resolves_present_variable() {
        let module = mapping_module(1, json!({ "out": "{{in}}" }));
        let result = execute(&module, &json!({ "in": 5 }));
        assert!(result.success);
        assert_eq!(result.data, Some(json!({ "out": 5 })));
    }

    #[test]
    fn test_absent_variable_keeps_literal_template() {
        let module = mapping_module(1, json!({ "out": "{{in}}" }));
        let result = execute(&module, &json!({ "other": 1 }));
        assert_eq!(result.data, Some(json!({ "out": "{{in}}" })));
    }

    #[test]
    fn test_non_object_input_keeps_literal_template() {
        let module = mapping_module(1, json!({ "out": "{{in}}" }));
        let result = execute(&module, &json!([1, 2]));
        assert_eq!(result.data, Some(json!({ "out": "{{in}}" })));
    }

    #[test]
    fn test_present_falsy_values_resolve() {
        let module = mapping_module(1, json!({ "zero": "{{z}}", "off": "{{f}}", "none": "{{n}}" }));
        let result = execute(&module, &json!({ "z": 0, "f": false, "n": null }));
        assert_eq!(result.data, Some(json!({ "zero": 0, "off": false, "none": null })));
    }

    #[test]
    fn test_static_values_pass_through() {
        let mapper = json!({
            "greeting": "hello {{name}}",
            "count": 3,
            "nested": { "inner": "{{name}}" },
            "list": ["{{name}}"]
        });
        let module = mapping_module(1, mapper.clone());
        let result = execute(&module, &json!({ "name": "Ada" }));
        assert_eq!(result.data, Some(mapper));
    }

    #[test]
    fn test_missing_mapper_yields_empty_object() {
        let mut module = mapping_module(1, json!({}));
        module.mapper = None;
        let result = execute(&module, &json!({ "a": 1 }));
        assert!(result.success);
        assert_eq!(result.data, Some(json!({})));
    }

    #[test]
    fn test_malformed_mapper_is_a_failure() {
        let module = mapping_module(1, json!(["out", "{{in}}"]));
        let result = execute(&module, &json!({}));
        assert!(!result.success);
        assert!(result.error.unwrap().contains("an array"));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let module = mapping_module(1, json!({ "a": "{{x}}", "b": "{{missing}}", "c": 1 }));
        let input = json!({ "x": { "deep": [1, 2] } });
        assert_eq!(execute(&module, &input), execute(&module, &input));
    }

    #[test]
    fn test_round_tripped_module_maps_identically() {
        let module = mapping_module(7, json!({ "out": "{{in}}" }));
        let encoded = serde_json::to_string(&module).unwrap();
        let decoded: Module = serde_json::from_str(&encoded).unwrap();

        assert_eq!(execute(&decoded, &json!({ "in": 5 })).data, Some(json!({ "out": 5 })));
        assert_eq!(execute(&decoded, &json!({})).data, Some(json!({ "out": "{{in}}" })));
    }
}
