use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Largest cell the serializer will emit verbatim, in characters (1 MiB)
pub const MAX_CELL_CHARS: usize = 1024 * 1024;

const TOO_LARGE_NOTE: &str = "Object too large, showing summary";
const FAILED_NOTE: &str = "Could not stringify object";

/// Serialize `value` to compact JSON without ever failing or growing unbounded.
///
/// Oversized output is replaced by a summary of the value's shape; a value
/// that cannot be encoded is replaced by an error summary.
pub fn safe_stringify<T: Serialize + ?Sized>(value: &T) -> String {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(err) => return failure_summary(&err),
    };

    // Byte length bounds char count from above, so only count when it might matter
    if encoded.len() > MAX_CELL_CHARS && encoded.chars().count() > MAX_CELL_CHARS {
        let bytes = encoded.len();
        drop(encoded);

        let (kind, length) = match serde_json::to_value(value) {
            Ok(tree) => shape_of(&tree),
            Err(err) => return failure_summary(&err),
        };
        debug!(kind, length, bytes, "value too large, writing summary");
        return json!({
            "note": TOO_LARGE_NOTE,
            "type": kind,
            "length": length,
        })
        .to_string();
    }

    encoded
}

fn failure_summary(err: &serde_json::Error) -> String {
    debug!(error = %err, "value could not be serialized, writing error summary");
    json!({
        "error": FAILED_NOTE,
        "reason": err.to_string(),
    })
    .to_string()
}

/// Kind name and element count used in the oversize summary
fn shape_of(value: &Value) -> (&'static str, usize) {
    match value {
        Value::Array(items) => ("array", items.len()),
        Value::Object(obj) => ("object", obj.len()),
        Value::String(s) => ("string", s.chars().count()),
        Value::Number(_) => ("number", 0),
        Value::Bool(_) => ("boolean", 0),
        Value::Null => ("null", 0),
    }
}
