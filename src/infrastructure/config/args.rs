use super::app_config::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments of `oxicord-inspect`.
#[derive(Debug, Parser)]
#[command(
    name = "oxicord-inspect",
    version,
    about = "Decode captured Discord gateway payloads",
    long_about = None
)]
pub struct CliArgs {
    /// Capture file with one gateway payload per line. Reads stdin when
    /// omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Stop at the first payload that fails to decode.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub strict: Option<bool>,

    /// List fields each payload left out.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub show_undefined: Option<bool>,

    /// Intent bits the capturing session used.
    #[arg(long, value_name = "BITS")]
    pub intents: Option<u64>,

    /// Only print this dispatch event. Repeatable.
    #[arg(short, long = "event", value_name = "NAME")]
    pub events: Vec<String>,
}
