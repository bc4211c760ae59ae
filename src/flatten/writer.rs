use crate::error::{ConvertError, Result};
use crate::flatten::types::{OutputMode, Row};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Destination for flattened rows. Each batch is handed over in one call.
pub trait RowSink {
    fn write_rows(&mut self, rows: &[Row]) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// Writes rows as delimited text with a header line
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    mode: OutputMode,
}

impl CsvSink<File> {
    /// Create (or truncate) `path` and write the header for `mode`
    pub fn create<P: AsRef<Path>>(path: P, mode: OutputMode, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
        Self::new(file, mode, delimiter)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W, mode: OutputMode, delimiter: u8) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(inner);

        writer.write_record(mode.columns().iter().map(|c| c.title))?;

        Ok(CsvSink { writer, mode })
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ConvertError::from(e.into_error()))
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            if row.mode() != self.mode {
                return Err(ConvertError::Config(format!(
                    "cannot write a {} row to a {} sink",
                    row.mode(),
                    self.mode
                )));
            }
            self.writer.write_record(row.values())?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every batch in memory; handy for tests and embedding
#[derive(Debug, Default)]
pub struct MemorySink {
    pub batches: Vec<Vec<Row>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.batches.iter().flatten()
    }
}

impl RowSink for MemorySink {
    fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        self.batches.push(rows.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rag_row(code: &str, small: &str) -> Row {
        Row::new(
            OutputMode::Rag,
            vec![
                ("code", code.to_string()),
                ("metadata_small", small.to_string()),
                ("metadata_big_1", "{}".to_string()),
                ("metadata_big_2", "{}".to_string()),
                ("metadata_big_3", "{}".to_string()),
            ],
        )
    }

    #[test]
    fn test_header_written_on_creation() {
        let sink = CsvSink::new(Vec::new(), OutputMode::Default, b';').unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        assert_eq!(
            output,
            "ENDPOINT;METHOD;SUMMARY;DESCRIPTION;PARAMETERS;REQUEST_BODY;RESPONSES;TAGS;SECURITY;SERVERS;SCHEMAS\n"
        );
    }

    #[test]
    fn test_quotes_only_when_needed() {
        let mut sink = CsvSink::new(Vec::new(), OutputMode::Rag, b';').unwrap();
        sink.write_rows(&[
            rag_row("/pets", r#"{"a":1}"#),
            rag_row("/x;y", "line one\nline two"),
        ])
        .unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        let expected = concat!(
            "code;metadata_small;metadata_big_1;metadata_big_2;metadata_big_3\n",
            "/pets;\"{\"\"a\"\":1}\";{};{};{}\n",
            "\"/x;y\";\"line one\nline two\";{};{};{}\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_custom_delimiter() {
        let mut sink = CsvSink::new(Vec::new(), OutputMode::Rag, b',').unwrap();
        sink.write_rows(&[rag_row("/a,b", "plain")]).unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        assert!(output.starts_with("code,metadata_small,"));
        assert!(output.ends_with("\"/a,b\",plain,{},{},{}\n"));
    }

    #[test]
    fn test_rejects_rows_of_other_mode() {
        let mut sink = CsvSink::new(Vec::new(), OutputMode::Default, b';').unwrap();
        let err = sink.write_rows(&[rag_row("/a", "{}")]).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_memory_sink_keeps_batches() {
        let mut sink = MemorySink::new();
        sink.write_rows(&[rag_row("/a", "{}")]).unwrap();
        sink.write_rows(&[rag_row("/b", "{}"), rag_row("/c", "{}")]).unwrap();

        assert_eq!(sink.batches.len(), 2);
        let codes: Vec<&str> = sink.rows().filter_map(|r| r.get("code")).collect();
        assert_eq!(codes, vec!["/a", "/b", "/c"]);
    }
}
