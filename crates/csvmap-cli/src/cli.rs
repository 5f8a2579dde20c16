//! CLI argument definitions for csvmap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use csvmap_model::FieldKey;
use csvmap_submit::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "csvmap",
    version,
    about = "Map CSV columns onto backend fields and upload the records",
    long_about = "Load a CSV file, map its columns onto the fixed lead fields \
                  (plus any custom fields) and post the remapped records as JSON.\n\n\
                  The first row of the file is treated as the header row."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (names, emails) to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the header columns of a CSV file (or of every CSV file in a folder).
    Headers(HeadersArgs),

    /// List the fixed fields and the labels sent to the backend.
    Fields,

    /// Show the records the current mapping produces.
    Preview(PreviewArgs),

    /// Transform the file and post the records to the upload endpoint.
    Submit(SubmitArgs),
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// CSV file or folder containing CSV files.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Mapping edits shared by `preview` and `submit`.
#[derive(Args, Default)]
pub struct MappingArgs {
    /// Start from a saved mapping profile (JSON).
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Map a fixed field onto a header, e.g. `--map email=Mail`.
    ///
    /// An empty header (`--map email=`) unsets the field.
    #[arg(long = "map", value_name = "FIELD=HEADER", value_parser = parse_field_assignment)]
    pub map: Vec<(FieldKey, String)>,

    /// Add a custom output field fed from a header, e.g. `--custom Notes=Comment`.
    #[arg(long = "custom", value_name = "NAME=HEADER", value_parser = parse_custom_assignment)]
    pub custom: Vec<(String, String)>,

    /// Write the resulting mapping profile to this path.
    #[arg(long = "save-mapping", value_name = "PATH")]
    pub save_mapping: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// CSV file to map.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Maximum number of records to show.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// CSV file to map and upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Upload endpoint.
    #[arg(long = "endpoint", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the JSON body instead of sending it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse `FIELD=HEADER` for `--map`.
pub fn parse_field_assignment(raw: &str) -> Result<(FieldKey, String), String> {
    let (field, header) = split_assignment(raw)?;
    let field = field.parse::<FieldKey>().map_err(|e| {
        let known: Vec<&str> = FieldKey::ALL.iter().map(FieldKey::as_str).collect();
        format!("{e} (expected one of: {})", known.join(", "))
    })?;
    Ok((field, header.to_string()))
}

/// Parse `NAME=HEADER` for `--custom`.
pub fn parse_custom_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, header) = split_assignment(raw)?;
    if name.is_empty() {
        return Err("custom field name must not be empty".to_string());
    }
    Ok((name.to_string(), header.to_string()))
}

/// Split on the first `=`; headers may themselves contain `=`.
fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(left, right)| (left.trim(), right))
        .ok_or_else(|| format!("expected NAME=HEADER, got '{raw}'"))
}
