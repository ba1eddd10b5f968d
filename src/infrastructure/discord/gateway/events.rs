use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{Member, Message, OwnUser, PartialMessage, ReactionEmoji};
use crate::domain::snowflake::{ApplicationId, ChannelId, GuildId, MessageId, UserId};
use crate::domain::undefined::UndefinedOr;

/// A decoded dispatch (opcode 0) event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(clippy::large_enum_variant)]
pub enum DispatchEvent {
    Ready(ReadyEvent),
    MessageCreate(MessageCreateEvent),
    MessageUpdate(MessageUpdateEvent),
    MessageDelete(MessageDeleteEvent),
    MessageDeleteBulk(MessageDeleteBulkEvent),
    MessageReactionAdd(ReactionAddEvent),
    MessageReactionRemove(ReactionRemoveEvent),
    MessageReactionRemoveAll(ReactionRemoveAllEvent),
    /// An event this crate has no model for, kept undecoded.
    Unknown { event_name: String, data: Value },
}

impl DispatchEvent {
    #[must_use]
    pub fn event_name(&self) -> &str {
        match self {
            Self::Ready(_) => "READY",
            Self::MessageCreate(_) => "MESSAGE_CREATE",
            Self::MessageUpdate(_) => "MESSAGE_UPDATE",
            Self::MessageDelete(_) => "MESSAGE_DELETE",
            Self::MessageDeleteBulk(_) => "MESSAGE_DELETE_BULK",
            Self::MessageReactionAdd(_) => "MESSAGE_REACTION_ADD",
            Self::MessageReactionRemove(_) => "MESSAGE_REACTION_REMOVE",
            Self::MessageReactionRemoveAll(_) => "MESSAGE_REACTION_REMOVE_ALL",
            Self::Unknown { event_name, .. } => event_name,
        }
    }

    #[must_use]
    pub const fn channel_id(&self) -> Option<ChannelId> {
        match self {
            Self::MessageCreate(event) => Some(event.message.channel_id()),
            Self::MessageUpdate(event) => Some(event.message.channel_id),
            Self::MessageDelete(event) => Some(event.channel_id),
            Self::MessageDeleteBulk(event) => Some(event.channel_id),
            Self::MessageReactionAdd(event) => Some(event.channel_id),
            Self::MessageReactionRemove(event) => Some(event.channel_id),
            Self::MessageReactionRemoveAll(event) => Some(event.channel_id),
            Self::Ready(_) | Self::Unknown { .. } => None,
        }
    }

    /// Guild id exactly as the payload carried it.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::MessageCreate(event) => event.message.guild_id(),
            Self::MessageUpdate(event) => event.message.guild_id,
            Self::MessageDelete(event) => event.guild_id,
            Self::MessageDeleteBulk(event) => event.guild_id,
            Self::MessageReactionAdd(event) => event.guild_id,
            Self::MessageReactionRemove(event) => event.guild_id,
            Self::MessageReactionRemoveAll(event) => event.guild_id,
            Self::Ready(_) | Self::Unknown { .. } => None,
        }
    }

    /// Id of the single message the event is about.
    #[must_use]
    pub const fn message_id(&self) -> Option<MessageId> {
        match self {
            Self::MessageCreate(event) => Some(event.message.id()),
            Self::MessageUpdate(event) => Some(event.message.id),
            Self::MessageDelete(event) => Some(event.message_id),
            Self::MessageReactionAdd(event) => Some(event.message_id),
            Self::MessageReactionRemove(event) => Some(event.message_id),
            Self::MessageReactionRemoveAll(event) => Some(event.message_id),
            Self::Ready(_) | Self::MessageDeleteBulk(_) | Self::Unknown { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_message_event(&self) -> bool {
        !matches!(self, Self::Ready(_) | Self::Unknown { .. })
    }
}

/// First event of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyEvent {
    pub version: u8,
    pub session_id: String,
    pub user: OwnUser,
    /// Guilds the session is in.
    pub guild_ids: Vec<GuildId>,
    /// Guilds READY marked unavailable, to be filled in by later events.
    pub unavailable_guild_ids: Vec<GuildId>,
    pub resume_gateway_url: Option<String>,
    pub application_id: Option<ApplicationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCreateEvent {
    pub message: Message,
}

/// A message was edited, or Discord changed it on its own.
///
/// The message is partial. Its `member` is `Undefined` when the update did
/// not include member data, and its `guild_id` is only what the payload sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageUpdateEvent {
    pub message: PartialMessage,
}

impl MessageUpdateEvent {
    /// Returns true if the update came from a user edit rather than Discord
    /// attaching embeds or finishing uploads.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.message.edited_timestamp.is_defined() || self.message.content.is_defined()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDeleteEvent {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDeleteBulkEvent {
    pub message_ids: Vec<MessageId>,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionAddEvent {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub guild_id: Option<GuildId>,
    /// Member who reacted; only sent for guild reactions.
    #[serde(skip_serializing_if = "UndefinedOr::is_undefined")]
    pub member: UndefinedOr<Member>,
    pub emoji: ReactionEmoji,
    pub message_author_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionRemoveEvent {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub guild_id: Option<GuildId>,
    pub emoji: ReactionEmoji,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionRemoveAllEvent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub guild_id: Option<GuildId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_event_ids() {
        let event = DispatchEvent::MessageDelete(MessageDeleteEvent {
            message_id: MessageId(1),
            channel_id: ChannelId(2),
            guild_id: None,
        });

        assert_eq!(event.event_name(), "MESSAGE_DELETE");
        assert_eq!(event.channel_id(), Some(ChannelId(2)));
        assert_eq!(event.message_id(), Some(MessageId(1)));
        assert_eq!(event.guild_id(), None);
        assert!(event.is_message_event());
    }

    #[test]
    fn test_unknown_event_keeps_name() {
        let event = DispatchEvent::Unknown {
            event_name: "GUILD_AUDIT_LOG_ENTRY_CREATE".into(),
            data: Value::Null,
        };
        assert_eq!(event.event_name(), "GUILD_AUDIT_LOG_ENTRY_CREATE");
        assert!(!event.is_message_event());
        assert!(event.channel_id().is_none());
    }

    #[test]
    fn test_update_is_edit() {
        let mut update = MessageUpdateEvent {
            message: PartialMessage::new(1_u64, 2_u64),
        };
        assert!(!update.is_edit());

        update.message.content = UndefinedOr::Defined("edited".into());
        assert!(update.is_edit());
    }

    #[test]
    fn test_serialized_shape() {
        let event = DispatchEvent::MessageReactionRemoveAll(ReactionRemoveAllEvent {
            channel_id: ChannelId(2),
            message_id: MessageId(1),
            guild_id: Some(GuildId(3)),
        });
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event"], "MESSAGE_REACTION_REMOVE_ALL");
        assert_eq!(value["data"]["guild_id"], "3");
    }
}
