use crate::flatten::refs::{component_schemas, relevant_schemas};
use crate::flatten::serializer::safe_stringify;
use crate::flatten::types::{Endpoint, OutputMode, Row};
use serde_json::{json, Map, Value};

/// Flattens endpoints of one document into CSV rows
pub struct EndpointFlattener<'a> {
    mode: OutputMode,
    schemas: Option<&'a Map<String, Value>>,
    servers: &'a Value,
}

static EMPTY_ARRAY: Value = Value::Array(Vec::new());

impl<'a> EndpointFlattener<'a> {
    pub fn new(document: &'a Value, mode: OutputMode) -> Self {
        EndpointFlattener {
            mode,
            schemas: component_schemas(document),
            servers: present(document.get("servers")).unwrap_or(&EMPTY_ARRAY),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Produce the row for one (path, method, operation) triple
    pub fn flatten(&self, endpoint: &Endpoint<'_>) -> Row {
        let relevant = relevant_schemas(endpoint.operation, self.schemas);

        match self.mode {
            OutputMode::Default => self.default_row(endpoint, relevant),
            OutputMode::Rag => self.rag_row(endpoint, relevant),
        }
    }

    fn default_row(&self, endpoint: &Endpoint<'_>, relevant: Map<String, Value>) -> Row {
        let op = endpoint.operation;

        Row::new(
            OutputMode::Default,
            vec![
                ("endpoint", endpoint.path.to_string()),
                ("method", endpoint.method.to_uppercase()),
                ("summary", text_field(op, "summary")),
                ("description", text_field(op, "description")),
                ("parameters", safe_stringify(&list_field(op, "parameters"))),
                ("requestBody", safe_stringify(&map_field(op, "requestBody"))),
                ("responses", safe_stringify(&map_field(op, "responses"))),
                ("tags", safe_stringify(&list_field(op, "tags"))),
                ("security", safe_stringify(&list_field(op, "security"))),
                ("servers", safe_stringify(self.servers)),
                ("schemas", safe_stringify(&relevant)),
            ],
        )
    }

    fn rag_row(&self, endpoint: &Endpoint<'_>, relevant: Map<String, Value>) -> Row {
        let op = endpoint.operation;

        let metadata_small = json!({
            "method": endpoint.method.to_uppercase(),
            "summary": text_field(op, "summary"),
            "description": text_field(op, "description"),
            "parameters": list_field(op, "parameters"),
        });

        let metadata_big_1 = json!({
            "requestBody": map_field(op, "requestBody"),
            "responses": map_field(op, "responses"),
            "tags": list_field(op, "tags"),
            "security": list_field(op, "security"),
            "servers": self.servers,
        });

        // Reserved column, always an empty object for now
        let metadata_big_3 = Map::new();

        Row::new(
            OutputMode::Rag,
            vec![
                ("code", endpoint.path.to_string()),
                ("metadata_small", safe_stringify(&metadata_small)),
                ("metadata_big_1", safe_stringify(&metadata_big_1)),
                ("metadata_big_2", safe_stringify(&relevant)),
                ("metadata_big_3", safe_stringify(&metadata_big_3)),
            ],
        )
    }
}

/// Treat `null` the same as an absent field
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// String fields are copied verbatim; other values are written as JSON text
fn text_field(operation: &Value, key: &str) -> String {
    match present(operation.get(key)) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => safe_stringify(other),
    }
}

fn list_field<'v>(operation: &'v Value, key: &str) -> &'v Value {
    present(operation.get(key)).unwrap_or(&EMPTY_ARRAY)
}

fn map_field(operation: &Value, key: &str) -> Value {
    present(operation.get(key))
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}
