//! Event sink writing to a byte stream.

use std::fmt::Write as _;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::trace;

use crate::domain::errors::SinkError;
use crate::domain::ports::{EventReport, EventSinkPort, MessageFacts};
use crate::domain::undefined::UndefinedOr;
use crate::infrastructure::config::{OutputConfig, OutputFormat};

/// Label for a tri-state answer.
#[must_use]
pub const fn tri_state_label(value: UndefinedOr<bool>) -> &'static str {
    match value {
        UndefinedOr::Defined(true) => "yes",
        UndefinedOr::Defined(false) => "no",
        UndefinedOr::Undefined => "unknown",
    }
}

/// Renders events onto any async writer, stdout in the binary.
pub struct StreamSink<W> {
    writer: Mutex<W>,
    format: OutputFormat,
    show_undefined: bool,
}

impl StreamSink<tokio::io::Stdout> {
    /// Creates a sink on the process stdout.
    #[must_use]
    pub fn stdout(config: &OutputConfig) -> Self {
        Self::new(tokio::io::stdout(), config)
    }
}

impl<W> StreamSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    #[must_use]
    pub fn new(writer: W, config: &OutputConfig) -> Self {
        Self {
            writer: Mutex::new(writer),
            format: config.format,
            show_undefined: config.show_undefined,
        }
    }

    /// Returns the writer, e.g. to read back a buffer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn render(&self, report: &EventReport) -> Result<String, SinkError> {
        let mut report = report.clone();
        if !self.show_undefined
            && let Some(facts) = report.message.as_mut()
        {
            facts.undefined_fields.clear();
        }

        let mut rendered = match self.format {
            OutputFormat::Summary => summary_line(&report),
            OutputFormat::Json => serde_json::to_string(&report)
                .map_err(|e| SinkError::encoding(format!("Failed to encode event: {e}")))?,
            OutputFormat::Debug => format!("{report:#?}"),
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

fn summary_line(report: &EventReport) -> String {
    let mut line = format!("#{} ", report.line);
    match report.sequence {
        Some(sequence) => {
            let _ = write!(line, "s={sequence} ");
        }
        None => line.push_str("s=- "),
    }
    line.push_str(&report.event_name);

    if let Some(channel_id) = report.channel_id {
        let _ = write!(line, " channel={channel_id}");
    }
    if let Some(guild_id) = report.guild_id {
        let _ = write!(line, " guild={guild_id}");
    }
    if let Some(message_id) = report.message_id {
        let _ = write!(line, " message={message_id}");
    }
    if let Some(facts) = &report.message {
        push_facts(&mut line, facts);
    }
    line
}

fn push_facts(line: &mut String, facts: &MessageFacts) {
    match &facts.author {
        UndefinedOr::Defined(author) => {
            let _ = write!(line, " author={author:?}");
        }
        UndefinedOr::Undefined => line.push_str(" author=unknown"),
    }
    let _ = write!(
        line,
        " webhook={} human={} member={}",
        tri_state_label(facts.is_webhook),
        tri_state_label(facts.is_human),
        tri_state_label(facts.has_member),
    );
    if !facts.undefined_fields.is_empty() {
        let _ = write!(line, " undefined=[{}]", facts.undefined_fields.join(","));
    }
}

#[async_trait]
impl<W> EventSinkPort for StreamSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, report: &EventReport) -> Result<(), SinkError> {
        let rendered = self.render(report)?;
        trace!(line = report.line, bytes = rendered.len(), "Writing event");
        self.writer.lock().await.write_all(rendered.as_bytes()).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snowflake::{ChannelId, GuildId, MessageId};

    fn update_report() -> EventReport {
        EventReport::new(2, "MESSAGE_UPDATE")
            .with_sequence(Some(5))
            .with_ids(Some(ChannelId(20)), Some(GuildId(30)), Some(MessageId(10)))
            .with_message(MessageFacts {
                undefined_fields: vec!["author", "member"],
                ..MessageFacts::default()
            })
    }

    async fn render_with(config: OutputConfig, report: &EventReport) -> String {
        let sink = StreamSink::new(Vec::new(), &config);
        sink.emit(report).await.unwrap();
        sink.flush().await.unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_tri_state_label() {
        assert_eq!(tri_state_label(UndefinedOr::Defined(true)), "yes");
        assert_eq!(tri_state_label(UndefinedOr::Defined(false)), "no");
        assert_eq!(tri_state_label(UndefinedOr::Undefined), "unknown");
    }

    #[tokio::test]
    async fn test_summary_line() {
        let output = render_with(OutputConfig::default(), &update_report()).await;

        assert_eq!(
            output,
            "#2 s=5 MESSAGE_UPDATE channel=20 guild=30 message=10 author=unknown \
             webhook=unknown human=unknown member=unknown\n"
        );
    }

    #[tokio::test]
    async fn test_summary_line_shows_undefined_fields() {
        let config = OutputConfig {
            show_undefined: true,
            ..OutputConfig::default()
        };
        let output = render_with(config, &update_report()).await;

        assert!(output.trim_end().ends_with("undefined=[author,member]"));
    }

    #[tokio::test]
    async fn test_summary_line_without_message() {
        let report = EventReport::new(1, "READY");
        let output = render_with(OutputConfig::default(), &report).await;
        assert_eq!(output, "#1 s=- READY\n");
    }

    #[tokio::test]
    async fn test_json_output() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let output = render_with(config, &update_report()).await;
        let value: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();

        assert_eq!(value["event_name"], "MESSAGE_UPDATE");
        assert_eq!(value["guild_id"], "30");
        assert!(value["message"]["is_webhook"].is_null());
        assert_eq!(value["message"]["undefined_fields"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_debug_output() {
        let config = OutputConfig {
            format: OutputFormat::Debug,
            ..OutputConfig::default()
        };
        let output = render_with(config, &update_report()).await;
        assert!(output.starts_with("EventReport {"));
    }
}
