//! Partially known messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::message_link;
use super::{Attachment, Embed, Member, Message, MessageFlags, MessageKind, MessageReference, Reaction, User};
use crate::domain::errors::ModelError;
use crate::domain::snowflake::{ApplicationId, ChannelId, GuildId, MessageId, RoleId, WebhookId};
use crate::domain::undefined::{UndefinedNoneOr, UndefinedOr};

/// A message of which only some fields are known.
///
/// Discord sends these for `MESSAGE_UPDATE`: edits carry most fields, but
/// updates Discord makes on its own (unfurling a link into an embed, finishing
/// an attachment upload) carry little more than the ids and the changed field.
/// Every field that may be missing is therefore an [`UndefinedOr`], and
/// `Undefined` always means "not sent", never "empty" or "none".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct PartialMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    /// Guild the message was sent in, exactly as the payload carried it.
    ///
    /// Discord does not include this on every partial update, so `None` can
    /// mean "direct message" or "guild message whose guild was not sent". It
    /// is deliberately not filled in from a cached channel: the cache may not
    /// know the channel either, and a wrong guild is worse than none.
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub author: UndefinedOr<User>,
    /// Guild member of the author.
    ///
    /// `Undefined` when the update did not include member data, which is the
    /// case for embed and attachment updates even in guilds.
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub member: UndefinedOr<Member>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub content: UndefinedOr<String>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub timestamp: UndefinedOr<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub edited_timestamp: UndefinedNoneOr<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub tts: UndefinedOr<bool>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub mention_everyone: UndefinedOr<bool>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub mentions: UndefinedOr<Vec<User>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub mention_roles: UndefinedOr<Vec<RoleId>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub attachments: UndefinedOr<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub embeds: UndefinedOr<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub reactions: UndefinedOr<Vec<Reaction>>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub pinned: UndefinedOr<bool>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub webhook_id: UndefinedNoneOr<WebhookId>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub kind: UndefinedOr<MessageKind>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub flags: UndefinedOr<MessageFlags>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub application_id: UndefinedNoneOr<ApplicationId>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub reference: UndefinedNoneOr<MessageReference>,
    #[serde(default, skip_serializing_if = "UndefinedOr::is_undefined")]
    pub referenced: UndefinedNoneOr<Box<Message>>,
}

impl PartialMessage {
    /// Creates a partial message with only its ids known.
    #[must_use]
    pub fn new(id: impl Into<MessageId>, channel_id: impl Into<ChannelId>) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    /// Whether the message was sent through a webhook.
    ///
    /// `Undefined` when the update did not say, since a missing `webhook_id`
    /// on a partial message is no evidence either way.
    #[must_use]
    pub const fn is_webhook(&self) -> UndefinedOr<bool> {
        match self.webhook_id {
            UndefinedOr::Undefined => UndefinedOr::Undefined,
            UndefinedOr::Defined(webhook_id) => UndefinedOr::Defined(webhook_id.is_some()),
        }
    }

    /// Whether a person typed this message.
    ///
    /// A bot or system author settles it as `false`. Otherwise the answer
    /// depends on the webhook id, and is `Undefined` if either the author or
    /// the webhook id is unknown.
    #[must_use]
    pub const fn is_human(&self) -> UndefinedOr<bool> {
        let UndefinedOr::Defined(author) = &self.author else {
            return UndefinedOr::Undefined;
        };
        if author.is_bot() || author.is_system() {
            return UndefinedOr::Defined(false);
        }
        match self.is_webhook() {
            UndefinedOr::Undefined => UndefinedOr::Undefined,
            UndefinedOr::Defined(is_webhook) => UndefinedOr::Defined(!is_webhook),
        }
    }

    /// Returns true if the update touched nothing but the content-derived
    /// fields Discord fills in on its own (embeds, attachments, flags).
    #[must_use]
    pub const fn is_system_update(&self) -> bool {
        self.author.is_undefined()
            && self.content.is_undefined()
            && self.edited_timestamp.is_undefined()
            && (self.embeds.is_defined() || self.attachments.is_defined() || self.flags.is_defined())
    }

    /// Jump URL for the message.
    ///
    /// Uses `@me` when the guild is unknown, which is wrong for guild messages
    /// whose update omitted the guild id.
    #[must_use]
    pub fn link(&self) -> String {
        message_link(self.guild_id, self.channel_id, self.id)
    }

    /// Builds a full message if every required field is defined.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingField`] naming the first field that was not
    /// provided.
    pub fn into_message(self) -> Result<Message, ModelError> {
        let author = self.author.defined().ok_or_else(|| ModelError::missing("author"))?;
        let content = self.content.defined().ok_or_else(|| ModelError::missing("content"))?;
        let timestamp = self
            .timestamp
            .defined()
            .ok_or_else(|| ModelError::missing("timestamp"))?;

        let mut message = Message::new(self.id, self.channel_id, author, content, timestamp);
        if let Some(guild_id) = self.guild_id {
            message = message.with_guild_id(guild_id);
        }
        if let UndefinedOr::Defined(member) = self.member {
            message = message.with_member(member);
        }
        if let UndefinedOr::Defined(Some(edited)) = self.edited_timestamp {
            message = message.with_edited_timestamp(edited);
        }
        if let UndefinedOr::Defined(Some(webhook_id)) = self.webhook_id {
            message = message.with_webhook_id(webhook_id);
        }
        if let UndefinedOr::Defined(Some(application_id)) = self.application_id {
            message = message.with_application_id(application_id);
        }
        if let UndefinedOr::Defined(Some(reference)) = self.reference {
            message = message.with_reference(reference);
        }
        if let UndefinedOr::Defined(Some(referenced)) = self.referenced {
            message = message.with_referenced(*referenced);
        }

        Ok(message
            .with_tts(self.tts.unwrap_or(false))
            .with_mention_everyone(self.mention_everyone.unwrap_or(false))
            .with_mentions(self.mentions.unwrap_or_default())
            .with_mention_roles(self.mention_roles.unwrap_or_default())
            .with_attachments(self.attachments.unwrap_or_default())
            .with_embeds(self.embeds.unwrap_or_default())
            .with_reactions(self.reactions.unwrap_or_default())
            .with_pinned(self.pinned.unwrap_or(false))
            .with_kind(self.kind.unwrap_or_default())
            .with_flags(self.flags.unwrap_or_default()))
    }
}

impl From<Message> for PartialMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.id(),
            channel_id: message.channel_id(),
            guild_id: message.guild_id(),
            author: UndefinedOr::Defined(message.author().clone()),
            member: message.member().cloned().map_or(UndefinedOr::Undefined, UndefinedOr::Defined),
            content: UndefinedOr::Defined(message.content().to_string()),
            timestamp: UndefinedOr::Defined(message.timestamp()),
            edited_timestamp: UndefinedOr::Defined(message.edited_timestamp()),
            tts: UndefinedOr::Defined(message.is_tts()),
            mention_everyone: UndefinedOr::Defined(message.mentions_everyone()),
            mentions: UndefinedOr::Defined(message.mentions().to_vec()),
            mention_roles: UndefinedOr::Defined(message.mention_roles().to_vec()),
            attachments: UndefinedOr::Defined(message.attachments().to_vec()),
            embeds: UndefinedOr::Defined(message.embeds().to_vec()),
            reactions: UndefinedOr::Defined(message.reactions().to_vec()),
            pinned: UndefinedOr::Defined(message.is_pinned()),
            webhook_id: UndefinedOr::Defined(message.webhook_id()),
            kind: UndefinedOr::Defined(message.kind()),
            flags: UndefinedOr::Defined(message.flags()),
            application_id: UndefinedOr::Defined(message.application_id()),
            reference: UndefinedOr::Defined(message.reference().cloned()),
            referenced: UndefinedOr::Defined(message.referenced().cloned().map(Box::new)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn human() -> User {
        User::new(1_u64, "human", "0", None, false)
    }

    fn partial() -> PartialMessage {
        PartialMessage::new(10_u64, 20_u64)
    }

    #[test]
    fn test_is_webhook_tri_state() {
        let mut message = partial();
        assert_eq!(message.is_webhook(), UndefinedOr::Undefined);

        message.webhook_id = UndefinedOr::Defined(None);
        assert_eq!(message.is_webhook(), UndefinedOr::Defined(false));

        message.webhook_id = UndefinedOr::Defined(Some(WebhookId(3)));
        assert_eq!(message.is_webhook(), UndefinedOr::Defined(true));
    }

    #[test]
    fn test_is_human_unknown_without_author() {
        let mut message = partial();
        message.webhook_id = UndefinedOr::Defined(None);
        assert_eq!(message.is_human(), UndefinedOr::Undefined);
    }

    #[test]
    fn test_is_human_unknown_without_webhook_info() {
        let mut message = partial();
        message.author = UndefinedOr::Defined(human());
        assert_eq!(message.is_human(), UndefinedOr::Undefined);
    }

    #[test]
    fn test_is_human_definite_answers() {
        let mut message = partial();
        message.author = UndefinedOr::Defined(human());
        message.webhook_id = UndefinedOr::Defined(None);
        assert_eq!(message.is_human(), UndefinedOr::Defined(true));

        message.webhook_id = UndefinedOr::Defined(Some(WebhookId(3)));
        assert_eq!(message.is_human(), UndefinedOr::Defined(false));

        let mut bot_message = partial();
        bot_message.author = UndefinedOr::Defined(User::new(2_u64, "bot", "0", None, true));
        assert_eq!(bot_message.is_human(), UndefinedOr::Defined(false));
    }

    #[test]
    fn test_is_human_false_for_system_author_without_webhook_info() {
        let mut message = partial();
        message.author = UndefinedOr::Defined(
            User::new(643_945_264_868_098_049_u64, "Discord", "0000", None, false)
                .with_system(true),
        );

        assert!(message.webhook_id.is_undefined());
        assert_eq!(message.is_webhook(), UndefinedOr::Undefined);
        assert_eq!(message.is_human(), UndefinedOr::Defined(false));
    }

    #[test]
    fn test_is_system_update() {
        let mut embed_update = partial();
        embed_update.embeds = UndefinedOr::Defined(vec![Embed::default()]);
        assert!(embed_update.is_system_update());

        let mut edit = partial();
        edit.content = UndefinedOr::Defined("edited".into());
        edit.embeds = UndefinedOr::Defined(Vec::new());
        assert!(!edit.is_system_update());

        assert!(!partial().is_system_update());
    }

    #[test]
    fn test_into_message_reports_missing_field() {
        let mut message = partial();
        message.author = UndefinedOr::Defined(human());
        let err = message.into_message().unwrap_err();
        assert_eq!(err, ModelError::missing("content"));
    }

    #[test]
    fn test_message_partial_conversion_keeps_values() {
        let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let message = Message::new(10_u64, 20_u64, human(), "hi", timestamp)
            .with_guild_id(GuildId(30))
            .with_pinned(true);

        let partial = PartialMessage::from(message.clone());
        assert_eq!(partial.is_webhook(), UndefinedOr::Defined(false));
        assert_eq!(partial.is_human(), UndefinedOr::Defined(true));
        assert!(partial.member.is_undefined());
        assert_eq!(partial.edited_timestamp, UndefinedOr::Defined(None));

        assert_eq!(partial.into_message().unwrap(), message);
    }

    #[test]
    fn test_apply_update_only_touches_defined_fields() {
        let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let edited_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 5, 0).unwrap();
        let mut message = Message::new(10_u64, 20_u64, human(), "hi", timestamp)
            .with_edited_timestamp(edited_at)
            .with_pinned(true);

        let mut update = partial();
        update.embeds = UndefinedOr::Defined(vec![Embed {
            title: Some("preview".into()),
            ..Embed::default()
        }]);
        message.apply_update(&update);

        assert_eq!(message.content(), "hi");
        assert!(message.is_pinned());
        assert_eq!(message.edited_timestamp(), Some(edited_at));
        assert_eq!(message.embeds().len(), 1);
        assert_eq!(message.author().username(), "human");

        let mut clear = partial();
        clear.edited_timestamp = UndefinedOr::Defined(None);
        clear.content = UndefinedOr::Defined("bye".into());
        message.apply_update(&clear);

        assert_eq!(message.content(), "bye");
        assert!(!message.is_edited());
    }

    #[test]
    fn test_deserialize_keeps_null_and_missing_apart() {
        let json = r#"{
            "id": "10",
            "channel_id": "20",
            "webhook_id": null,
            "edited_timestamp": "2020-01-01T00:05:00+00:00"
        }"#;
        let message: PartialMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.webhook_id, UndefinedOr::Defined(None));
        assert!(message.member.is_undefined());
        assert!(message.author.is_undefined());
        assert!(message.edited_timestamp.is_defined());
        assert!(message.guild_id.is_none());
        assert_eq!(message.link(), "https://discord.com/channels/@me/20/10");
    }
}
