//! # openapi2csv - OpenAPI to CSV for RAG pipelines
//!
//! Flattens every operation of an OpenAPI document into one CSV row, together
//! with the component schemas that operation actually references.
//!
//! ## Modules
//!
//! - **flatten**: reference extraction, safe serialization, row layouts and batching
//! - **loader**: JSON / YAML input into a generic value tree
//! - **pipeline**: the batch-by-batch conversion driver
//!
//! ## Quick Start
//!
//! ```rust
//! use openapi2csv::flatten::{MemorySink, OutputMode};
//! use openapi2csv::pipeline::process_in_batches;
//! use serde_json::json;
//! use std::num::NonZeroUsize;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document = json!({
//!     "paths": {
//!         "/pets": {
//!             "get": {
//!                 "summary": "List pets",
//!                 "responses": {
//!                     "200": {"content": {"application/json": {
//!                         "schema": {"$ref": "#/components/schemas/Pet"}
//!                     }}}
//!                 }
//!             }
//!         }
//!     },
//!     "components": {"schemas": {"Pet": {"type": "object"}}}
//! });
//!
//! let mut sink = MemorySink::new();
//! let stats = process_in_batches(&document, &mut sink, NonZeroUsize::new(100).unwrap(), OutputMode::Default)?;
//!
//! assert_eq!(stats.total_endpoints, 1);
//! let row = sink.rows().next().unwrap();
//! assert_eq!(row.get("method"), Some("GET"));
//! assert_eq!(row.get("schemas"), Some(r#"{"Pet":{"type":"object"}}"#));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod pipeline;

pub use config::{ConvertConfig, InputFormat, OUTPUT_FILE_NAME};
pub use error::{ConvertError, Result};
pub use flatten::{EndpointBatches, EndpointFlattener, OutputMode, Row, RowSink};
pub use loader::load_document;
pub use pipeline::{convert, process_in_batches, BatchStats, ConversionReport};
