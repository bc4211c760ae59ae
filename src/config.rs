use crate::error::{ConvertError, Result};
use crate::flatten::OutputMode;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Name of the single CSV file written into the output directory
pub const OUTPUT_FILE_NAME: &str = "api_spec.csv";

/// Serialization format of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Json => f.write_str("json"),
            InputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// OpenAPI document to read
    pub input: PathBuf,

    /// Directory that receives `api_spec.csv`
    pub output_dir: PathBuf,

    /// How to parse the input
    pub format: InputFormat,

    /// Row layout of the CSV file
    pub output_mode: OutputMode,

    /// Number of endpoints flattened and flushed together.
    /// Kept signed so that bad values reach validation instead of wrapping.
    pub batch_size: i64,

    /// CSV field delimiter
    pub delimiter: char,

    /// Debug-level logging and full error chains. Read by the binary when it
    /// sets up logging; the conversion itself does not depend on it.
    pub verbose: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            input: PathBuf::from("./spec.json"),
            output_dir: PathBuf::from("./output"),
            format: InputFormat::Json,
            output_mode: OutputMode::Default,
            batch_size: 100,
            delimiter: ';',
            verbose: false,
        }
    }
}

impl ConvertConfig {
    /// Check the scalar settings and return the batch size in its checked form
    pub fn validate(&self) -> Result<NonZeroUsize> {
        self.delimiter_byte()?;

        usize::try_from(self.batch_size)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                ConvertError::Config(format!(
                    "batch size must be a positive integer, got {}",
                    self.batch_size
                ))
            })
    }

    /// The delimiter as the single byte the CSV writer needs
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            return Err(ConvertError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConvertError::Config(format!(
                "{:?} cannot be used as a delimiter",
                self.delimiter
            )));
        }
        Ok(self.delimiter as u8)
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}
