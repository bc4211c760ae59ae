//! Conversion driver: load → batch → flatten → write

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::flatten::{CsvSink, EndpointBatches, EndpointFlattener, OutputMode, Row, RowSink};
use crate::loader::load_document;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counters collected while streaming batches into a sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Rows handed to the sink
    pub total_endpoints: usize,

    /// Number of sink writes
    pub batches: usize,

    /// Largest combined cell size of a single batch, in bytes.
    /// Peak row memory is bounded by this figure.
    pub peak_batch_bytes: usize,
}

/// Outcome of a successful [`convert`] run
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Absolute path of the CSV file
    pub output_file: PathBuf,
    pub total_endpoints: usize,
    pub batches: usize,
    pub peak_batch_bytes: usize,
}

/// Run a full conversion as described by `config`
pub fn convert(config: &ConvertConfig) -> Result<ConversionReport> {
    let batch_size = config.validate()?;
    let delimiter = config.delimiter_byte()?;

    if !config.input.is_file() {
        return Err(ConvertError::Config(format!(
            "input file {} does not exist or is not a file",
            config.input.display()
        )));
    }

    let unusable_output = |e: std::io::Error| {
        ConvertError::Config(format!(
            "output directory {} cannot be created: {e}",
            config.output_dir.display()
        ))
    };
    std::fs::create_dir_all(&config.output_dir).map_err(unusable_output)?;
    let output_dir = std::fs::canonicalize(&config.output_dir).map_err(unusable_output)?;
    let output_file = output_dir.join(crate::config::OUTPUT_FILE_NAME);

    let document = load_document(&config.input, config.format)?;
    check_document(&document)?;

    debug!(path = %output_file.display(), mode = %config.output_mode, "setting up CSV writer");
    let mut sink = CsvSink::create(&output_file, config.output_mode, delimiter)?;

    debug!(batch_size = batch_size.get(), "processing document in batches");
    let stats = process_in_batches(&document, &mut sink, batch_size, config.output_mode)?;
    sink.flush()?;

    info!(
        total = stats.total_endpoints,
        path = %output_file.display(),
        "converted OpenAPI document to CSV"
    );

    Ok(ConversionReport {
        output_file,
        total_endpoints: stats.total_endpoints,
        batches: stats.batches,
        peak_batch_bytes: stats.peak_batch_bytes,
    })
}

/// Make sure the document is something endpoints can be enumerated from
pub fn check_document(document: &Value) -> Result<()> {
    let Some(root) = document.as_object() else {
        return Err(ConvertError::Document("document root is not a mapping".to_string()));
    };

    match root.get("paths") {
        None | Some(Value::Null) => {
            warn!("document has no paths, output will only contain the header");
            Ok(())
        }
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(ConvertError::Document("`paths` is not a mapping".to_string())),
    }
}

/// Flatten every endpoint of `document` into `sink`, one write per batch.
///
/// Batches are written strictly in enumeration order, and a batch's rows are
/// dropped before the next batch is built.
pub fn process_in_batches<S: RowSink + ?Sized>(
    document: &Value,
    sink: &mut S,
    batch_size: NonZeroUsize,
    mode: OutputMode,
) -> Result<BatchStats> {
    let flattener = EndpointFlattener::new(document, mode);
    let mut stats = BatchStats::default();

    for batch in EndpointBatches::new(document, batch_size) {
        let rows: Vec<Row> = batch.iter().map(|endpoint| flattener.flatten(endpoint)).collect();
        let batch_bytes: usize = rows.iter().map(Row::byte_size).sum();

        sink.write_rows(&rows)?;

        stats.total_endpoints += rows.len();
        stats.batches += 1;
        stats.peak_batch_bytes = stats.peak_batch_bytes.max(batch_bytes);
        info!(
            batch = rows.len(),
            total = stats.total_endpoints,
            "processed batch of endpoints"
        );
    }

    Ok(stats)
}
