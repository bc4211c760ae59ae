//! Endpoint flattening - turn OpenAPI operations into CSV rows
//!
//! This module walks a document's path map, resolves the component schemas
//! each operation references and serializes everything into one of two row
//! layouts.
//!
//! ## Memory
//!
//! Endpoints are enumerated lazily and grouped into batches by
//! `EndpointBatches`; only one batch of rows is alive at a time, whatever the
//! size of the document.

pub mod batch;
pub mod extractor;
pub mod refs;
pub mod serializer;
pub mod types;
pub mod writer;

pub use batch::{Batch, EndpointBatches, Endpoints};
pub use extractor::EndpointFlattener;
pub use refs::{component_schemas, extract_schema_refs, relevant_schemas, REF_KEY};
pub use serializer::{safe_stringify, MAX_CELL_CHARS};
pub use types::{is_http_method, Column, Endpoint, OutputMode, Row, HTTP_METHODS};
pub use writer::{CsvSink, MemorySink, RowSink};
