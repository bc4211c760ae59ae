use serde_json::Value;
use std::fmt;

/// HTTP methods that mark a path-item entry as an operation
pub const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "options", "head"];

pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

/// One CSV column: the field id used in rows and the title written in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub title: &'static str,
}

const fn column(id: &'static str, title: &'static str) -> Column {
    Column { id, title }
}

static DEFAULT_COLUMNS: [Column; 11] = [
    column("endpoint", "ENDPOINT"),
    column("method", "METHOD"),
    column("summary", "SUMMARY"),
    column("description", "DESCRIPTION"),
    column("parameters", "PARAMETERS"),
    column("requestBody", "REQUEST_BODY"),
    column("responses", "RESPONSES"),
    column("tags", "TAGS"),
    column("security", "SECURITY"),
    column("servers", "SERVERS"),
    column("schemas", "SCHEMAS"),
];

static RAG_COLUMNS: [Column; 5] = [
    column("code", "code"),
    column("metadata_small", "metadata_small"),
    column("metadata_big_1", "metadata_big_1"),
    column("metadata_big_2", "metadata_big_2"),
    column("metadata_big_3", "metadata_big_3"),
];

/// Row layout of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One column per operation field
    #[default]
    Default,
    /// Five columns shaped for RAG ingestion
    Rag,
}

impl OutputMode {
    pub fn columns(&self) -> &'static [Column] {
        match self {
            OutputMode::Default => &DEFAULT_COLUMNS,
            OutputMode::Rag => &RAG_COLUMNS,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Default => f.write_str("default"),
            OutputMode::Rag => f.write_str("rag"),
        }
    }
}

/// A (path, method, operation) triple borrowed from the document
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub operation: &'a Value,
}

/// One flattened endpoint - represents one line of the CSV file.
///
/// Values are stored in the column order of the mode that produced the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    mode: OutputMode,
    values: Vec<String>,
}

impl Row {
    /// Build a row from `(field id, value)` pairs, which must follow the mode's columns.
    pub(crate) fn new(mode: OutputMode, fields: Vec<(&'static str, String)>) -> Self {
        debug_assert!(fields
            .iter()
            .map(|(id, _)| *id)
            .eq(mode.columns().iter().map(|c| c.id)));

        Row {
            mode,
            values: fields.into_iter().map(|(_, value)| value).collect(),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Look up a field by its column id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.mode
            .columns()
            .iter()
            .position(|c| c.id == id)
            .map(|idx| self.values[idx].as_str())
    }

    /// Field values in header order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total size of all cells in bytes
    pub fn byte_size(&self) -> usize {
        self.values.iter().map(String::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_counts() {
        assert_eq!(OutputMode::Default.columns().len(), 11);
        assert_eq!(OutputMode::Rag.columns().len(), 5);
        assert_eq!(OutputMode::Default.columns()[5].title, "REQUEST_BODY");
    }

    #[test]
    fn test_recognized_methods() {
        assert!(is_http_method("get"));
        assert!(is_http_method("head"));
        assert!(!is_http_method("parameters"));
        assert!(!is_http_method("trace"));
        assert!(!is_http_method("GET"));
    }

    #[test]
    fn test_row_lookup() {
        let row = Row::new(
            OutputMode::Rag,
            vec![
                ("code", "/pets".to_string()),
                ("metadata_small", "{}".to_string()),
                ("metadata_big_1", "{}".to_string()),
                ("metadata_big_2", "{}".to_string()),
                ("metadata_big_3", "{}".to_string()),
            ],
        );

        assert_eq!(row.get("code"), Some("/pets"));
        assert_eq!(row.get("endpoint"), None);
        assert_eq!(row.len(), 5);
        assert_eq!(row.byte_size(), 5 + 4 * 2);
    }
}
