//! Inspector configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{InspectConfig, LogLevel, OutputConfig, OutputFormat};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
