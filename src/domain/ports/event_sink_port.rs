//! Event sink port definition.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::SinkError;
use crate::domain::snowflake::{ChannelId, GuildId, MessageId};
use crate::domain::undefined::UndefinedOr;

/// What the decoder could tell about the message behind an event.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MessageFacts {
    /// Author display name, if the payload carried the author.
    pub author: UndefinedOr<String>,
    pub is_webhook: UndefinedOr<bool>,
    pub is_human: UndefinedOr<bool>,
    /// Whether guild member data came with the message.
    pub has_member: UndefinedOr<bool>,
    /// Names of fields the payload left out.
    pub undefined_fields: Vec<&'static str>,
}

/// One decoded gateway payload, ready to be rendered.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[allow(missing_docs)]
pub struct EventReport {
    /// 1-based line of the capture the payload came from.
    pub line: usize,
    pub sequence: Option<u64>,
    pub event_name: String,
    pub channel_id: Option<ChannelId>,
    pub guild_id: Option<GuildId>,
    pub message_id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageFacts>,
    /// The typed event, re-encoded.
    pub detail: serde_json::Value,
}

#[allow(missing_docs)]
impl EventReport {
    #[must_use]
    pub fn new(line: usize, event_name: impl Into<String>) -> Self {
        Self {
            line,
            sequence: None,
            event_name: event_name.into(),
            channel_id: None,
            guild_id: None,
            message_id: None,
            message: None,
            detail: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub const fn with_sequence(mut self, sequence: Option<u64>) -> Self {
        self.sequence = sequence;
        self
    }

    #[must_use]
    pub const fn with_ids(
        mut self,
        channel_id: Option<ChannelId>,
        guild_id: Option<GuildId>,
        message_id: Option<MessageId>,
    ) -> Self {
        self.channel_id = channel_id;
        self.guild_id = guild_id;
        self.message_id = message_id;
        self
    }

    #[must_use]
    pub fn with_message(mut self, facts: MessageFacts) -> Self {
        self.message = Some(facts);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = detail;
        self
    }
}

/// Port for rendering decoded events.
#[async_trait]
pub trait EventSinkPort: Send + Sync {
    /// Writes one event.
    async fn emit(&self, report: &EventReport) -> Result<(), SinkError>;

    /// Flushes buffered output.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock sink that records every event it receives.
    pub struct MockEventSink {
        reports: Arc<RwLock<Vec<EventReport>>>,
        closed: bool,
    }

    impl MockEventSink {
        /// Creates an empty recording sink.
        pub fn new() -> Self {
            Self {
                reports: Arc::new(RwLock::new(Vec::new())),
                closed: false,
            }
        }

        /// Creates a sink that rejects every event.
        pub fn closed() -> Self {
            Self {
                closed: true,
                ..Self::new()
            }
        }

        /// Returns the recorded events.
        pub async fn reports(&self) -> Vec<EventReport> {
            self.reports.read().await.clone()
        }
    }

    impl Default for MockEventSink {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl EventSinkPort for MockEventSink {
        async fn emit(&self, report: &EventReport) -> Result<(), SinkError> {
            if self.closed {
                return Err(SinkError::Closed);
            }
            self.reports.write().await.push(report.clone());
            Ok(())
        }
    }
}
