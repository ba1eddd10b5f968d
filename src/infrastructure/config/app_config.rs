//! Inspector configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::discord::GatewayIntents;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// How decoded events are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per event.
    #[default]
    Summary,
    /// One JSON object per event.
    Json,
    /// Rust debug representation.
    Debug,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// List fields a payload left out instead of hiding them.
    #[serde(default)]
    pub show_undefined: bool,

    /// Only print these dispatch events. Empty prints everything.
    #[serde(default)]
    pub events: Vec<String>,
}

impl OutputConfig {
    /// Returns true if the named event passes the event filter.
    #[must_use]
    pub fn includes(&self, event_name: &str) -> bool {
        self.events.is_empty()
            || self
                .events
                .iter()
                .any(|name| name.eq_ignore_ascii_case(event_name))
    }
}

/// Inspector configuration, from file and CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Capture file to read; stdin when unset.
    #[serde(skip)]
    pub input: Option<PathBuf>,

    /// Log file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Stop at the first payload that fails to decode.
    #[serde(default)]
    pub strict: bool,

    /// Intents the capturing session was identified with.
    ///
    /// When set, events such a session would never receive are flagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intents: Option<GatewayIntents>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl InspectConfig {
    /// Merges CLI arguments into the configuration. CLI values win.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(input) = args.input
            && input.as_os_str() != "-"
        {
            self.input = Some(input);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(strict) = args.strict {
            self.strict = strict;
        }
        if let Some(intents) = args.intents {
            self.intents = Some(GatewayIntents::from_bits_retain(intents));
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(show_undefined) = args.show_undefined {
            self.output.show_undefined = show_undefined;
        }
        if !args.events.is_empty() {
            self.output.events = args.events;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"
            strict = true
            intents = 37377

            [output]
            format = "json"
            events = ["MESSAGE_UPDATE"]
        "#;

        let config: InspectConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.strict);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.show_undefined);
        assert!(config.output.includes("message_update"));
        assert!(!config.output.includes("MESSAGE_CREATE"));
        assert_eq!(config.intents, Some(GatewayIntents::messages()));
    }

    #[test]
    fn test_default_config() {
        let config = InspectConfig::default();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.strict);
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert!(config.output.includes("READY"));
        assert!(config.input.is_none());
    }

    #[test]
    fn test_cli_args_override_file() {
        let mut config: InspectConfig = toml::from_str(
            r#"
            strict = true

            [output]
            format = "json"
            show_undefined = true
            "#,
        )
        .unwrap();
        let args = CliArgs::parse_from([
            "oxicord-inspect",
            "capture.jsonl",
            "--format",
            "debug",
            "--strict=false",
            "--event",
            "MESSAGE_CREATE",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.input, Some(PathBuf::from("capture.jsonl")));
        assert_eq!(config.output.format, OutputFormat::Debug);
        assert!(!config.strict);
        assert!(config.output.show_undefined);
        assert_eq!(config.output.events, vec!["MESSAGE_CREATE".to_string()]);
    }

    #[test]
    fn test_bare_flags_leave_input_positional() {
        let args = CliArgs::try_parse_from([
            "oxicord-inspect",
            "--strict",
            "--show-undefined",
            "capture.jsonl",
        ])
        .unwrap();

        assert_eq!(args.strict, Some(true));
        assert_eq!(args.show_undefined, Some(true));
        assert_eq!(args.input, Some(PathBuf::from("capture.jsonl")));
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let mut config = InspectConfig {
            strict: true,
            ..InspectConfig::default()
        };
        config.merge_with_args(CliArgs::try_parse_from(["oxicord-inspect"]).unwrap());
        assert!(config.strict);
    }

    #[test]
    fn test_dash_input_means_stdin() {
        let mut config = InspectConfig::default();
        config.merge_with_args(CliArgs::parse_from(["oxicord-inspect", "-"]));
        assert!(config.input.is_none());
    }
}
