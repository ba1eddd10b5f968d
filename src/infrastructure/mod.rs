//! Infrastructure layer with external service adapters.

/// Inspector configuration.
pub mod config;
/// Discord gateway and REST decoding.
pub mod discord;
/// Event output adapters.
pub mod output;

pub use config::{CliArgs, InspectConfig, LogLevel, OutputFormat, StorageManager};
pub use discord::{DiscordError, DispatchEvent, EventParser, GatewayIntents};
pub use output::StreamSink;
