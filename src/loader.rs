//! Input loading: read an OpenAPI document from disk into a generic value tree
//!
//! Both JSON and YAML end up as a `serde_json::Value` so the rest of the
//! pipeline only deals with one tree type. Mapping order is preserved.

use crate::config::InputFormat;
use crate::error::{ConvertError, Result};
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::debug;

/// Read and parse the document at `path`
pub fn load_document<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Value> {
    let path = path.as_ref();

    debug!(path = %path.display(), "reading OpenAPI document");
    let mut content = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;

    debug!(bytes = content.len(), %format, "parsing document");
    match format {
        InputFormat::Json => {
            if let Some(value) = parse_json_simd(&mut content) {
                return Ok(value);
            }
            // simd-json clobbered the buffer, read it again for the diagnostic parse
            drop(content);
            let pristine = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
            parse_json(&pristine)
        }
        InputFormat::Yaml => {
            let text = std::str::from_utf8(&content).map_err(|e| parse_error(format, e))?;
            parse_yaml(text)
        }
    }
}

/// Parse JSON in place with the SIMD parser. `content` is clobbered either way.
fn parse_json_simd(content: &mut [u8]) -> Option<Value> {
    match simd_json::serde::from_slice::<Value>(content) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "SIMD parse failed, retrying with serde_json");
            None
        }
    }
}

/// Parse JSON with serde_json, whose errors carry line and column
pub fn parse_json(content: &[u8]) -> Result<Value> {
    serde_json::from_slice(content).map_err(|e| parse_error(InputFormat::Json, e))
}

/// Parse YAML, resolving `<<` merge keys before conversion
pub fn parse_yaml(text: &str) -> Result<Value> {
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| parse_error(InputFormat::Yaml, e))?;
    yaml.apply_merge().map_err(|e| parse_error(InputFormat::Yaml, e))?;
    Ok(yaml_to_json(yaml))
}

fn parse_error(format: InputFormat, err: impl std::fmt::Display) -> ConvertError {
    ConvertError::Parse {
        format: format.to_string(),
        message: err.to_string(),
    }
}

/// Convert a YAML tree into the JSON value model.
///
/// YAML allows non-string keys (`200:` under `responses` is an integer), so
/// keys are stringified. Tags are dropped, non-finite floats become null.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(mapping) => {
            let mut obj = Map::new();
            for (key, value) in mapping {
                obj.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        // Complex keys have no natural string form; use their JSON text
        other => yaml_to_json(other).to_string(),
    }
}
