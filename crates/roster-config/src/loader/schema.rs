//! Schema validation helpers for Roster JSON5 configuration.
//!
//! Layers are checked before merging so that errors point at the file that
//! introduced them.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "remote", "form", "validation"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("remote") {
        validate_remote(value, layer, "remote")?;
    }
    if let Some(value) = map.get("form") {
        validate_form(value, layer, "form")?;
    }
    if let Some(value) = map.get("validation") {
        validate_validation(value, layer, "validation")?;
    }
    Ok(())
}

/// Validate the "remote" block.
fn validate_remote(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["base_url", "timeout_secs", "user_agent"], layer, path)?;
    if let Some(value) = map.get("base_url") {
        expect_string(value, layer, &join_path(path, "base_url"))?;
    }
    if let Some(value) = map.get("timeout_secs") {
        expect_u64(value, layer, &join_path(path, "timeout_secs"))?;
    }
    if let Some(value) = map.get("user_agent") {
        expect_string(value, layer, &join_path(path, "user_agent"))?;
    }
    Ok(())
}

/// Validate the "form" block.
fn validate_form(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["fields", "initial_values", "submit_label"],
        layer,
        path,
    )?;
    if let Some(fields) = map.get("fields") {
        let fields_path = join_path(path, "fields");
        for (idx, entry) in expect_array(fields, layer, &fields_path)?.iter().enumerate() {
            let entry_path = format!("{fields_path}[{idx}]");
            let entry = expect_object(entry, layer, &entry_path)?;
            ensure_allowed_keys(entry, &["name", "label"], layer, &entry_path)?;
            require_string(entry, "name", layer, &entry_path)?;
            require_string(entry, "label", layer, &entry_path)?;
        }
    }
    if let Some(values) = map.get("initial_values") {
        let values_path = join_path(path, "initial_values");
        for (field, value) in expect_object(values, layer, &values_path)? {
            expect_string(value, layer, &join_path(&values_path, field))?;
        }
    }
    if let Some(value) = map.get("submit_label") {
        expect_string(value, layer, &join_path(path, "submit_label"))?;
    }
    Ok(())
}

/// Validate the "validation" block.
fn validate_validation(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["required"], layer, path)?;
    if let Some(rules) = map.get("required") {
        let rules_path = join_path(path, "required");
        for (idx, rule) in expect_array(rules, layer, &rules_path)?.iter().enumerate() {
            let rule_path = format!("{rules_path}[{idx}]");
            let rule = expect_object(rule, layer, &rule_path)?;
            ensure_allowed_keys(rule, &["field", "message"], layer, &rule_path)?;
            require_string(rule, "field", layer, &rule_path)?;
            require_string(rule, "message", layer, &rule_path)?;
        }
    }
    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

fn expect_array<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ConfigError> {
    match value {
        Value::Array(arr) => Ok(arr),
        _ => Err(invalid_field(layer, path, "expected array")),
    }
}

fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Require `key` to be present in `map` and hold a string.
fn require_string(
    map: &Map<String, Value>,
    key: &str,
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    let key_path = join_path(path, key);
    match map.get(key) {
        Some(value) => expect_string(value, layer, &key_path),
        None => Err(invalid_field(layer, &key_path, "missing required field")),
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid_field(layer, &join_path(path, key), "unknown key")),
        None => Ok(()),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{path}"),
        message: message.to_string(),
    }
}
