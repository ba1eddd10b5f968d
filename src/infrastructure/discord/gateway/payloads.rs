use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{
    Attachment, Embed, Member, MessageFlags, MessageKind, MessageReference, OwnUser, Reaction,
    ReactionEmoji, User,
};
use crate::domain::snowflake::{
    ApplicationId, ChannelId, GuildId, MessageId, RoleId, UserId, WebhookId,
};
use crate::domain::undefined::{UndefinedNoneOr, UndefinedOr};

/// Envelope every gateway payload arrives in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayPayload {
    pub op: u8,
    #[serde(default)]
    pub d: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
}

impl GatewayPayload {
    #[must_use]
    pub fn dispatch(event_name: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: 0,
            d: Some(data),
            s: Some(sequence),
            t: Some(event_name.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadyPayload {
    #[serde(rename = "v", default)]
    pub version: u8,
    pub session_id: String,
    pub user: OwnUser,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuildPayload>,
    #[serde(default)]
    pub resume_gateway_url: Option<String>,
    #[serde(default)]
    pub application: Option<ReadyApplicationPayload>,
}

#[derive(Debug, Deserialize)]
pub struct UnavailableGuildPayload {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Debug, Deserialize)]
pub struct ReadyApplicationPayload {
    pub id: ApplicationId,
}

/// Member data embedded in message and reaction payloads.
///
/// Messages embed it without `user`, since the author is the user; reaction
/// payloads include it.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl MemberPayload {
    /// Builds the member, taking `user` when the payload has no user of its own.
    #[must_use]
    pub fn into_member(self, user: User, guild_id: GuildId) -> Member {
        Member::new(self.user.unwrap_or(user), guild_id, self.joined_at)
            .with_nick(self.nick)
            .with_role_ids(self.roles)
            .with_premium_since(self.premium_since)
            .with_voice_state(self.deaf, self.mute)
            .with_pending(self.pending)
            .with_communication_disabled_until(self.communication_disabled_until)
    }
}

#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub author: User,
    #[serde(default)]
    pub member: Option<MemberPayload>,
    #[serde(default)]
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub mention_everyone: bool,
    #[serde(default)]
    pub mentions: Vec<User>,
    #[serde(default)]
    pub mention_roles: Vec<RoleId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub webhook_id: Option<WebhookId>,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub flags: MessageFlags,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub message_reference: Option<MessageReference>,
    #[serde(default)]
    pub referenced_message: Option<Box<Self>>,
}

/// `MESSAGE_UPDATE` data. Only `id` and `channel_id` are guaranteed.
#[derive(Debug, Deserialize)]
pub struct PartialMessagePayload {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub author: UndefinedOr<User>,
    #[serde(default)]
    pub member: UndefinedOr<MemberPayload>,
    #[serde(default)]
    pub content: UndefinedOr<String>,
    #[serde(default)]
    pub timestamp: UndefinedOr<DateTime<Utc>>,
    #[serde(default)]
    pub edited_timestamp: UndefinedNoneOr<DateTime<Utc>>,
    #[serde(default)]
    pub tts: UndefinedOr<bool>,
    #[serde(default)]
    pub mention_everyone: UndefinedOr<bool>,
    #[serde(default)]
    pub mentions: UndefinedOr<Vec<User>>,
    #[serde(default)]
    pub mention_roles: UndefinedOr<Vec<RoleId>>,
    #[serde(default)]
    pub attachments: UndefinedOr<Vec<Attachment>>,
    #[serde(default)]
    pub embeds: UndefinedOr<Vec<Embed>>,
    #[serde(default)]
    pub reactions: UndefinedOr<Vec<Reaction>>,
    #[serde(default)]
    pub pinned: UndefinedOr<bool>,
    #[serde(default)]
    pub webhook_id: UndefinedNoneOr<WebhookId>,
    #[serde(rename = "type", default)]
    pub kind: UndefinedOr<MessageKind>,
    #[serde(default)]
    pub flags: UndefinedOr<MessageFlags>,
    #[serde(default)]
    pub application_id: UndefinedNoneOr<ApplicationId>,
    #[serde(default)]
    pub message_reference: UndefinedNoneOr<MessageReference>,
    #[serde(default)]
    pub referenced_message: UndefinedNoneOr<Box<MessagePayload>>,
}

#[derive(Debug, Deserialize)]
pub struct MessageDeletePayload {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

#[derive(Debug, Deserialize)]
pub struct MessageDeleteBulkPayload {
    pub ids: Vec<MessageId>,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

/// `MESSAGE_REACTION_ADD` and `MESSAGE_REACTION_REMOVE` data.
#[derive(Debug, Deserialize)]
pub struct ReactionPayload {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub member: UndefinedOr<MemberPayload>,
    pub emoji: ReactionEmoji,
    #[serde(default)]
    pub message_author_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct ReactionRemoveAllPayload {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_without_data() {
        let payload: GatewayPayload = serde_json::from_str(r#"{"op": 11}"#).unwrap();
        assert_eq!(payload.op, 11);
        assert!(payload.d.is_none());
        assert!(payload.s.is_none());
        assert!(payload.t.is_none());
    }

    #[test]
    fn test_dispatch_envelope() {
        let payload = GatewayPayload::dispatch("MESSAGE_DELETE", 7, json!({"id": "1"}));
        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(encoded["op"], 0);
        assert_eq!(encoded["s"], 7);
        assert_eq!(encoded["t"], "MESSAGE_DELETE");
    }

    #[test]
    fn test_member_payload_uses_given_user() {
        let payload: MemberPayload = serde_json::from_value(json!({
            "nick": "neko",
            "roles": ["1", "2"],
            "joined_at": "2019-06-01T12:00:00+00:00",
        }))
        .unwrap();
        let author = User::new(42_u64, "nekokatt", "0", None, false);

        let member = payload.into_member(author, GuildId(7));
        assert_eq!(member.user_id(), UserId(42));
        assert_eq!(member.nick(), Some("neko"));
        assert!(member.has_role(RoleId(2)));
        assert_eq!(member.guild_id(), GuildId(7));
    }

    #[test]
    fn test_partial_message_payload_tri_state() {
        let payload: PartialMessagePayload = serde_json::from_value(json!({
            "id": "10",
            "channel_id": "20",
            "embeds": [],
            "webhook_id": null,
        }))
        .unwrap();

        assert!(payload.author.is_undefined());
        assert!(payload.member.is_undefined());
        assert!(payload.webhook_id.is_null());
        assert_eq!(payload.embeds, UndefinedOr::Defined(Vec::new()));
        assert!(payload.kind.is_undefined());
    }
}
