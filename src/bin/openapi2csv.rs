//! openapi2csv: Flatten an OpenAPI document into a CSV file for RAG ingestion
//!
//! Usage:
//!   # JSON document, default wide layout
//!   openapi2csv -i spec.json -o ./output
//!
//!   # YAML document, five-column RAG layout, comma separated
//!   openapi2csv -i spec.yaml -f yaml --output-format rag -d ','
//!
//!   # Small batches to keep peak memory low on huge documents
//!   openapi2csv -i huge.json -b 10 --verbose

// Large documents are parsed whole; mimalloc keeps the allocation churn cheap
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use openapi2csv::{convert, ConvertConfig, InputFormat, OutputMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "openapi2csv", version)]
#[command(about = "Convert OpenAPI specification to CSV format for RAG systems", long_about = None)]
struct Args {
    /// Input OpenAPI spec file
    #[arg(short, long, value_name = "PATH", default_value = "./spec.json")]
    input: PathBuf,

    /// Output directory for the CSV file
    #[arg(short, long, value_name = "PATH", default_value = "./output")]
    output: PathBuf,

    /// Input format type
    #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Output format type
    #[arg(long, value_enum, default_value_t = ModeArg::Default)]
    output_format: ModeArg,

    /// Number of endpoints to process per batch
    #[arg(short, long, default_value_t = 100, allow_negative_numbers = true)]
    batch_size: i64,

    /// CSV delimiter character
    #[arg(short, long, default_value_t = ';')]
    delimiter: char,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    #[value(alias = "yml")]
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Default,
    #[value(alias = "csv-to-rag")]
    Rag,
}

impl Args {
    fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            input: self.input.clone(),
            output_dir: self.output.clone(),
            format: match self.format {
                FormatArg::Json => InputFormat::Json,
                FormatArg::Yaml => InputFormat::Yaml,
            },
            output_mode: match self.output_format {
                ModeArg::Default => OutputMode::Default,
                ModeArg::Rag => OutputMode::Rag,
            },
            batch_size: self.batch_size,
            delimiter: self.delimiter,
            verbose: self.verbose,
        }
    }
}

fn main() -> ExitCode {
    let config = Args::parse().to_config();
    init_logging(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if config.verbose {
                eprintln!("Details: {err:?}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ConvertConfig) -> Result<()> {
    debug!(
        input = %config.input.display(),
        output = %config.output_dir.display(),
        format = %config.format,
        mode = %config.output_mode,
        batch_size = config.batch_size,
        delimiter = %config.delimiter,
        "configuration"
    );

    let report = convert(config)
        .with_context(|| format!("failed to convert {}", config.input.display()))?;

    println!("Total endpoints processed: {}", report.total_endpoints);
    println!("Output file: {}", report.output_file.display());
    debug!(
        batches = report.batches,
        peak_batch_bytes = report.peak_batch_bytes,
        "batch statistics"
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
