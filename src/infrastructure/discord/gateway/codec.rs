use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::constants::GatewayOpcode;
use super::error::{GatewayError, GatewayResult};
use super::events::{
    DispatchEvent, MessageCreateEvent, MessageDeleteBulkEvent, MessageDeleteEvent,
    MessageUpdateEvent, ReactionAddEvent, ReactionRemoveAllEvent, ReactionRemoveEvent, ReadyEvent,
};
use super::payloads::{
    GatewayPayload, MessageDeleteBulkPayload, MessageDeletePayload, MessagePayload,
    PartialMessagePayload, ReactionPayload, ReactionRemoveAllPayload, ReadyPayload,
};
use crate::domain::entities::{Message, PartialMessage};
use crate::domain::undefined::UndefinedOr;

/// A dispatch event together with its envelope sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedEvent {
    pub sequence: Option<u64>,
    pub event: DispatchEvent,
}

/// Decodes gateway JSON into typed events.
pub struct EventParser;

impl EventParser {
    /// Parses the envelope of a text frame.
    pub fn parse_payload(json: &str) -> GatewayResult<GatewayPayload> {
        serde_json::from_str(json)
            .map_err(|e| GatewayError::serialization(format!("Failed to parse payload: {e}")))
    }

    /// Parses a text frame that must hold a dispatch event.
    pub fn parse_dispatch_payload(json: &str) -> GatewayResult<SequencedEvent> {
        let payload = Self::parse_payload(json)?;
        if payload.op != GatewayOpcode::Dispatch.as_u8() {
            return Err(GatewayError::unexpected_opcode(payload.op));
        }

        let event_name = payload
            .t
            .ok_or_else(|| GatewayError::protocol("Dispatch payload without event name"))?;
        let event = Self::parse_dispatch(&event_name, payload.d)?;

        Ok(SequencedEvent {
            sequence: payload.s,
            event,
        })
    }

    /// Decodes the data of a dispatch event.
    ///
    /// Event names without a model give [`DispatchEvent::Unknown`].
    pub fn parse_dispatch(event_name: &str, data: Option<Value>) -> GatewayResult<DispatchEvent> {
        let data = data.ok_or_else(|| GatewayError::protocol("Missing dispatch data"))?;

        match event_name {
            "READY" => Self::parse_ready(data),
            "MESSAGE_CREATE" => Self::parse_message_create(data),
            "MESSAGE_UPDATE" => Self::parse_message_update(data),
            "MESSAGE_DELETE" => Self::parse_message_delete(data),
            "MESSAGE_DELETE_BULK" => Self::parse_message_delete_bulk(data),
            "MESSAGE_REACTION_ADD" => Self::parse_reaction_add(data),
            "MESSAGE_REACTION_REMOVE" => Self::parse_reaction_remove(data),
            "MESSAGE_REACTION_REMOVE_ALL" => Self::parse_reaction_remove_all(data),
            _ => {
                debug!(event = event_name, "No model for dispatch event");
                Ok(DispatchEvent::Unknown {
                    event_name: event_name.to_string(),
                    data,
                })
            }
        }
    }

    fn decode<T: DeserializeOwned>(data: Value, what: &str) -> GatewayResult<T> {
        serde_json::from_value(data)
            .map_err(|e| GatewayError::serialization(format!("Failed to parse {what}: {e}")))
    }

    fn parse_ready(data: Value) -> GatewayResult<DispatchEvent> {
        let ready: ReadyPayload = Self::decode(data, "Ready")?;
        let unavailable_guild_ids = ready
            .guilds
            .iter()
            .filter(|guild| guild.unavailable)
            .map(|guild| guild.id)
            .collect();

        Ok(DispatchEvent::Ready(ReadyEvent {
            version: ready.version,
            session_id: ready.session_id,
            user: ready.user,
            guild_ids: ready.guilds.into_iter().map(|guild| guild.id).collect(),
            unavailable_guild_ids,
            resume_gateway_url: ready.resume_gateway_url,
            application_id: ready.application.map(|application| application.id),
        }))
    }

    fn parse_message_create(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: MessagePayload = Self::decode(data, "MessageCreate")?;
        Ok(DispatchEvent::MessageCreate(MessageCreateEvent {
            message: Self::convert_message_payload(payload),
        }))
    }

    fn parse_message_update(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: PartialMessagePayload = Self::decode(data, "MessageUpdate")?;
        Ok(DispatchEvent::MessageUpdate(MessageUpdateEvent {
            message: Self::convert_partial_message_payload(payload),
        }))
    }

    fn parse_message_delete(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: MessageDeletePayload = Self::decode(data, "MessageDelete")?;
        Ok(DispatchEvent::MessageDelete(MessageDeleteEvent {
            message_id: payload.id,
            channel_id: payload.channel_id,
            guild_id: payload.guild_id,
        }))
    }

    fn parse_message_delete_bulk(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: MessageDeleteBulkPayload = Self::decode(data, "MessageDeleteBulk")?;
        Ok(DispatchEvent::MessageDeleteBulk(MessageDeleteBulkEvent {
            message_ids: payload.ids,
            channel_id: payload.channel_id,
            guild_id: payload.guild_id,
        }))
    }

    fn parse_reaction_add(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: ReactionPayload = Self::decode(data, "ReactionAdd")?;

        let member = match (payload.member, payload.guild_id) {
            (UndefinedOr::Defined(member), Some(guild_id)) => match member.user.clone() {
                Some(user) => UndefinedOr::Defined(member.into_member(user, guild_id)),
                None => {
                    debug!(user_id = %payload.user_id, "Reaction member without user, skipping");
                    UndefinedOr::Undefined
                }
            },
            _ => UndefinedOr::Undefined,
        };

        Ok(DispatchEvent::MessageReactionAdd(ReactionAddEvent {
            user_id: payload.user_id,
            channel_id: payload.channel_id,
            message_id: payload.message_id,
            guild_id: payload.guild_id,
            member,
            emoji: payload.emoji,
            message_author_id: payload.message_author_id,
        }))
    }

    fn parse_reaction_remove(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: ReactionPayload = Self::decode(data, "ReactionRemove")?;
        Ok(DispatchEvent::MessageReactionRemove(ReactionRemoveEvent {
            user_id: payload.user_id,
            channel_id: payload.channel_id,
            message_id: payload.message_id,
            guild_id: payload.guild_id,
            emoji: payload.emoji,
        }))
    }

    fn parse_reaction_remove_all(data: Value) -> GatewayResult<DispatchEvent> {
        let payload: ReactionRemoveAllPayload = Self::decode(data, "ReactionRemoveAll")?;
        Ok(DispatchEvent::MessageReactionRemoveAll(ReactionRemoveAllEvent {
            channel_id: payload.channel_id,
            message_id: payload.message_id,
            guild_id: payload.guild_id,
        }))
    }

    fn convert_message_payload(payload: MessagePayload) -> Message {
        let mut message = Message::new(
            payload.id,
            payload.channel_id,
            payload.author.clone(),
            payload.content,
            payload.timestamp,
        )
        .with_tts(payload.tts)
        .with_mention_everyone(payload.mention_everyone)
        .with_mentions(payload.mentions)
        .with_mention_roles(payload.mention_roles)
        .with_attachments(payload.attachments)
        .with_embeds(payload.embeds)
        .with_reactions(payload.reactions)
        .with_pinned(payload.pinned)
        .with_kind(payload.kind)
        .with_flags(payload.flags);

        if let Some(guild_id) = payload.guild_id {
            message = message.with_guild_id(guild_id);
            if let Some(member) = payload.member {
                message = message.with_member(member.into_member(payload.author, guild_id));
            }
        }
        if let Some(edited) = payload.edited_timestamp {
            message = message.with_edited_timestamp(edited);
        }
        if let Some(webhook_id) = payload.webhook_id {
            message = message.with_webhook_id(webhook_id);
        }
        if let Some(application_id) = payload.application_id {
            message = message.with_application_id(application_id);
        }
        if let Some(reference) = payload.message_reference {
            message = message.with_reference(reference);
        }
        if let Some(referenced) = payload.referenced_message {
            message = message.with_referenced(Self::convert_message_payload(*referenced));
        }

        message
    }

    fn convert_partial_message_payload(payload: PartialMessagePayload) -> PartialMessage {
        let member = match (payload.member, payload.author.as_ref(), payload.guild_id) {
            (UndefinedOr::Defined(member), UndefinedOr::Defined(author), Some(guild_id)) => {
                UndefinedOr::Defined(member.into_member(author.clone(), guild_id))
            }
            (UndefinedOr::Defined(_), _, _) => {
                debug!(
                    message_id = %payload.id,
                    "Update member without author or guild, leaving it undefined"
                );
                UndefinedOr::Undefined
            }
            (UndefinedOr::Undefined, _, _) => UndefinedOr::Undefined,
        };

        PartialMessage {
            id: payload.id,
            channel_id: payload.channel_id,
            guild_id: payload.guild_id,
            author: payload.author,
            member,
            content: payload.content,
            timestamp: payload.timestamp,
            edited_timestamp: payload.edited_timestamp,
            tts: payload.tts,
            mention_everyone: payload.mention_everyone,
            mentions: payload.mentions,
            mention_roles: payload.mention_roles,
            attachments: payload.attachments,
            embeds: payload.embeds,
            reactions: payload.reactions,
            pinned: payload.pinned,
            webhook_id: payload.webhook_id,
            kind: payload.kind,
            flags: payload.flags,
            application_id: payload.application_id,
            reference: payload.message_reference,
            referenced: payload.referenced_message.map(|referenced| {
                referenced.map(|message| Box::new(Self::convert_message_payload(*message)))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ReactionEmoji;
    use crate::domain::snowflake::{ChannelId, GuildId, MessageId, UserId, WebhookId};
    use serde_json::json;

    fn message_create_data() -> Value {
        json!({
            "id": "334385199974967042",
            "channel_id": "290926798999357250",
            "guild_id": "290926798626357250",
            "author": {
                "id": "53908099506183680",
                "username": "Mason",
                "discriminator": "9999",
                "avatar": "a_bab14f271d565501444b2ca3be944b25"
            },
            "member": {
                "nick": "mace",
                "roles": ["41771983423143936"],
                "joined_at": "2017-03-13T19:19:14.040000+00:00",
                "deaf": false,
                "mute": false
            },
            "content": "Supa Hot",
            "timestamp": "2017-07-11T17:27:07.299000+00:00",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 0
        })
    }

    #[test]
    fn test_event_parser_unknown_event() {
        let result = EventParser::parse_dispatch("UNKNOWN_EVENT", Some(json!({"a": 1}))).unwrap();
        assert!(matches!(
            result,
            DispatchEvent::Unknown { ref event_name, .. } if event_name == "UNKNOWN_EVENT"
        ));
    }

    #[test]
    fn test_missing_dispatch_data() {
        let err = EventParser::parse_dispatch("MESSAGE_CREATE", None).unwrap_err();
        assert!(matches!(err, GatewayError::Protocol { .. }));
    }

    #[test]
    fn test_parse_message_create() {
        let event = EventParser::parse_dispatch("MESSAGE_CREATE", Some(message_create_data()))
            .unwrap();
        let DispatchEvent::MessageCreate(MessageCreateEvent { message }) = event else {
            panic!("expected MESSAGE_CREATE");
        };

        assert_eq!(message.id(), MessageId(334_385_199_974_967_042));
        assert_eq!(message.guild_id(), Some(GuildId(290_926_798_626_357_250)));
        assert!(message.is_human());
        assert!(!message.is_webhook());
        let member = message.member().unwrap();
        assert_eq!(member.display_name(), "mace");
        assert_eq!(member.user_id(), UserId(53_908_099_506_183_680));
    }

    #[test]
    fn test_parse_message_create_malformed() {
        let err = EventParser::parse_dispatch("MESSAGE_CREATE", Some(json!({"id": "1"})))
            .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("MessageCreate"));
    }

    #[test]
    fn test_embed_only_update_leaves_member_undefined() {
        let data = json!({
            "id": "10",
            "channel_id": "20",
            "guild_id": "30",
            "embeds": [{"url": "https://example.com", "title": "Example"}]
        });
        let event = EventParser::parse_dispatch("MESSAGE_UPDATE", Some(data)).unwrap();
        let DispatchEvent::MessageUpdate(MessageUpdateEvent { message }) = event else {
            panic!("expected MESSAGE_UPDATE");
        };

        assert!(message.member.is_undefined());
        assert!(message.author.is_undefined());
        assert_eq!(message.is_webhook(), UndefinedOr::Undefined);
        assert_eq!(message.is_human(), UndefinedOr::Undefined);
        assert!(message.is_system_update());
    }

    #[test]
    fn test_update_without_guild_id_keeps_none() {
        let data = json!({"id": "10", "channel_id": "20", "content": "edited"});
        let event = EventParser::parse_dispatch("MESSAGE_UPDATE", Some(data)).unwrap();

        assert_eq!(event.guild_id(), None);
        assert_eq!(event.channel_id(), Some(ChannelId(20)));
    }

    #[test]
    fn test_full_update_builds_member_and_webhook_state() {
        let mut data = message_create_data();
        data["edited_timestamp"] = json!("2017-07-11T17:30:00+00:00");
        data["webhook_id"] = json!("77");
        let event = EventParser::parse_dispatch("MESSAGE_UPDATE", Some(data)).unwrap();
        let DispatchEvent::MessageUpdate(MessageUpdateEvent { message }) = event else {
            panic!("expected MESSAGE_UPDATE");
        };

        assert!(message.member.is_defined());
        assert_eq!(message.webhook_id, UndefinedOr::Defined(Some(WebhookId(77))));
        assert_eq!(message.is_webhook(), UndefinedOr::Defined(true));
        assert_eq!(message.is_human(), UndefinedOr::Defined(false));
        assert!(message.into_message().is_ok());
    }

    #[test]
    fn test_parse_reaction_add_dm() {
        let data = json!({
            "user_id": "1",
            "channel_id": "2",
            "message_id": "3",
            "emoji": {"id": null, "name": "🔥"}
        });
        let event = EventParser::parse_dispatch("MESSAGE_REACTION_ADD", Some(data)).unwrap();
        let DispatchEvent::MessageReactionAdd(reaction) = event else {
            panic!("expected MESSAGE_REACTION_ADD");
        };

        assert!(reaction.member.is_undefined());
        assert_eq!(
            reaction.emoji,
            ReactionEmoji::Unicode {
                name: "🔥".into()
            }
        );
    }

    #[test]
    fn test_parse_reaction_add_guild_member() {
        let data = json!({
            "user_id": "1",
            "channel_id": "2",
            "message_id": "3",
            "guild_id": "4",
            "member": {
                "user": {"id": "1", "username": "reactor"},
                "roles": [],
                "joined_at": "2020-01-01T00:00:00+00:00"
            },
            "emoji": {"id": "5", "name": "blob", "animated": true}
        });
        let event = EventParser::parse_dispatch("MESSAGE_REACTION_ADD", Some(data)).unwrap();
        let DispatchEvent::MessageReactionAdd(reaction) = event else {
            panic!("expected MESSAGE_REACTION_ADD");
        };

        let member = reaction.member.defined().unwrap();
        assert_eq!(member.guild_id(), GuildId(4));
        assert_eq!(member.user().username(), "reactor");
    }

    #[test]
    fn test_parse_dispatch_payload() {
        let json = r#"{"op":0,"s":42,"t":"MESSAGE_DELETE_BULK","d":{"ids":["1","2"],"channel_id":"3"}}"#;
        let sequenced = EventParser::parse_dispatch_payload(json).unwrap();

        assert_eq!(sequenced.sequence, Some(42));
        let DispatchEvent::MessageDeleteBulk(bulk) = sequenced.event else {
            panic!("expected MESSAGE_DELETE_BULK");
        };
        assert_eq!(bulk.message_ids, vec![MessageId(1), MessageId(2)]);
    }

    #[test]
    fn test_parse_dispatch_payload_rejects_other_opcodes() {
        let err = EventParser::parse_dispatch_payload(r#"{"op":11}"#).unwrap_err();
        assert_eq!(err, GatewayError::unexpected_opcode(11));
    }

    #[test]
    fn test_parse_ready() {
        let data = json!({
            "v": 10,
            "session_id": "abc",
            "user": {"id": "1", "username": "bot", "bot": true, "verified": true},
            "guilds": [{"id": "2", "unavailable": true}, {"id": "3"}],
            "application": {"id": "1", "flags": 0}
        });
        let event = EventParser::parse_dispatch("READY", Some(data)).unwrap();
        let DispatchEvent::Ready(ready) = event else {
            panic!("expected READY");
        };

        assert_eq!(ready.version, 10);
        assert!(ready.user.is_verified());
        assert_eq!(ready.guild_ids, vec![GuildId(2), GuildId(3)]);
        assert_eq!(ready.unavailable_guild_ids, vec![GuildId(2)]);
    }
}
