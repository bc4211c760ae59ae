//! Schema reference extraction
//!
//! Finds the `$ref` pointers inside an operation and resolves them against
//! `components.schemas`, so each row only carries the schemas it uses.

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Key under which reference pointers are stored
pub const REF_KEY: &str = "$ref";

/// Operation fields scanned for schema references, in resolution order
const REFERENCE_SOURCES: [&str; 3] = ["parameters", "requestBody", "responses"];

/// Collect every schema name referenced anywhere inside `value`.
///
/// The name is the last `/`-separated segment of the pointer. Names come back
/// in depth-first encounter order with duplicates removed.
pub fn extract_schema_refs(value: &Value) -> IndexSet<String> {
    let mut refs = IndexSet::new();
    collect_refs(value, &mut refs);
    refs
}

fn collect_refs(value: &Value, refs: &mut IndexSet<String>) {
    match value {
        Value::Object(obj) => {
            for (key, child) in obj {
                if key == REF_KEY {
                    if let Value::String(pointer) = child {
                        refs.insert(schema_name(pointer).to_string());
                        continue;
                    }
                }
                collect_refs(child, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, refs);
            }
        }
        _ => {}
    }
}

/// Final path segment of a reference pointer
fn schema_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// The `components.schemas` mapping of a document, if it has one
pub fn component_schemas(document: &Value) -> Option<&Map<String, Value>> {
    document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
}

/// Compute the schemas an operation depends on.
///
/// `parameters`, `requestBody` and `responses` are each scanned once; names
/// without a definition in `schemas`, or defined as `null`, are dropped.
/// Matching is exact on the final pointer segment.
pub fn relevant_schemas(operation: &Value, schemas: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut relevant = Map::new();
    let Some(schemas) = schemas else {
        return relevant;
    };

    for source in REFERENCE_SOURCES {
        let Some(subtree) = operation.get(source) else {
            continue;
        };

        for name in extract_schema_refs(subtree) {
            if relevant.contains_key(&name) {
                continue;
            }
            if let Some(definition) = schemas.get(&name).filter(|d| !d.is_null()) {
                relevant.insert(name, definition.clone());
            }
        }
    }

    relevant
}
