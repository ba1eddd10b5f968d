use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oxicord_model::application::{InspectError, InspectOptions, InspectPayloadsUseCase, InspectStats};
use oxicord_model::infrastructure::{CliArgs, InspectConfig, StorageManager, StreamSink};

fn init_logging(config: &InspectConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config() -> Result<InspectConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("failed to load configuration")?;
    config.merge_with_args(args);
    Ok(config)
}

async fn inspect(config: &InspectConfig) -> Result<InspectStats, InspectError> {
    let sink = Arc::new(StreamSink::stdout(&config.output));
    let use_case = InspectPayloadsUseCase::new(sink, InspectOptions::from(config));

    match &config.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            use_case.execute(BufReader::new(file)).await
        }
        None => use_case.execute(BufReader::new(tokio::io::stdin())).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;

    info!(
        version = oxicord_model::VERSION,
        input = ?config.input,
        format = %config.output.format,
        "Starting {}",
        oxicord_model::NAME
    );

    match inspect(&config).await {
        Ok(stats) => {
            if stats.malformed > 0 {
                warn!(count = stats.malformed, "Some payloads could not be decoded");
            }
            Ok(())
        }
        Err(InspectError::Sink(e)) if e.is_broken_pipe() => Ok(()),
        Err(e) => Err(e).wrap_err_with(|| match &config.input {
            Some(path) => format!("failed to inspect {}", path.display()),
            None => "failed to inspect stdin".to_string(),
        }),
    }
}
