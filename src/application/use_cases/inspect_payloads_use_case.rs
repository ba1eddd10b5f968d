//! Capture inspection use case.

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::application::dto::event_report;
use crate::domain::errors::SinkError;
use crate::domain::ports::EventSinkPort;
use crate::infrastructure::config::{InspectConfig, OutputConfig};
use crate::infrastructure::discord::{DiscordError, EventParser, GatewayError, GatewayIntents};

/// Errors that stop an inspection run.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum InspectError {
    #[error("failed to read capture: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DiscordError,
    },

    #[error("failed to write output: {0}")]
    Sink(#[from] SinkError),
}

impl InspectError {
    /// Line of the capture that failed to decode, if that is what happened.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Decode { line, .. } => Some(*line),
            Self::Read(_) | Self::Sink(_) => None,
        }
    }
}

/// What to do with each payload of a capture.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    /// Stop at the first payload that fails to decode.
    pub strict: bool,
    /// Intents of the capturing session.
    pub intents: Option<GatewayIntents>,
    /// Event filter.
    pub output: OutputConfig,
}

impl From<&InspectConfig> for InspectOptions {
    fn from(config: &InspectConfig) -> Self {
        Self {
            strict: config.strict,
            intents: config.intents,
            output: config.output.clone(),
        }
    }
}

/// Counters for one inspection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InspectStats {
    /// Non-blank lines read.
    pub lines: usize,
    /// Dispatch events decoded.
    pub decoded: usize,
    /// Events handed to the sink.
    pub emitted: usize,
    /// Events dropped by the event filter.
    pub filtered: usize,
    /// Payloads with an opcode other than dispatch.
    pub non_dispatch: usize,
    /// Lines that failed to decode.
    pub malformed: usize,
    /// Events the configured intents should not have delivered.
    pub unexpected: usize,
}

/// Decodes a capture of gateway payloads, one JSON payload per line.
#[derive(Clone)]
pub struct InspectPayloadsUseCase {
    sink: Arc<dyn EventSinkPort>,
    options: InspectOptions,
}

impl InspectPayloadsUseCase {
    /// Creates the use case over an output sink.
    #[must_use]
    pub const fn new(sink: Arc<dyn EventSinkPort>, options: InspectOptions) -> Self {
        Self { sink, options }
    }

    /// Reads the capture to its end and emits every decoded event.
    ///
    /// # Errors
    /// Returns error if reading or writing fails, or, in strict mode, on the
    /// first line that does not decode.
    pub async fn execute<R>(&self, reader: R) -> Result<InspectStats, InspectError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = InspectStats::default();
        let mut lines = reader.split(b'\n');
        let mut line_number = 0;

        while let Some(raw_line) = lines.next_segment().await? {
            line_number += 1;
            let decoded = String::from_utf8(raw_line)
                .map_err(|e| GatewayError::serialization(format!("Line is not valid UTF-8: {e}")))
                .and_then(|line| {
                    let payload = line.trim();
                    if payload.is_empty() {
                        return Ok(None);
                    }
                    EventParser::parse_dispatch_payload(payload).map(Some)
                });

            let sequenced = match decoded {
                Ok(Some(sequenced)) => {
                    stats.lines += 1;
                    sequenced
                }
                Ok(None) => continue,
                Err(GatewayError::UnexpectedOpcode { raw, .. }) => {
                    debug!(line = line_number, opcode = raw, "Skipping non-dispatch payload");
                    stats.lines += 1;
                    stats.non_dispatch += 1;
                    continue;
                }
                Err(e) => {
                    stats.lines += 1;
                    if self.options.strict {
                        return Err(InspectError::Decode {
                            line: line_number,
                            source: e.into(),
                        });
                    }
                    warn!(line = line_number, error = %e, "Skipping malformed payload");
                    stats.malformed += 1;
                    continue;
                }
            };
            stats.decoded += 1;

            let event_name = sequenced.event.event_name();
            if let Some(intents) = self.options.intents
                && !intents.receives(event_name)
            {
                warn!(
                    line = line_number,
                    event = event_name,
                    required = ?GatewayIntents::for_event(event_name),
                    "Event not covered by the configured intents"
                );
                stats.unexpected += 1;
            }

            if !self.options.output.includes(event_name) {
                stats.filtered += 1;
                continue;
            }

            self.sink.emit(&event_report(line_number, &sequenced)).await?;
            stats.emitted += 1;
        }

        self.sink.flush().await?;
        info!(
            lines = stats.lines,
            emitted = stats.emitted,
            malformed = stats.malformed,
            "Capture inspected"
        );

        Ok(stats)
    }
}
