use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Member, PartialMessage, User};
use crate::domain::snowflake::{
    ApplicationId, AttachmentId, ChannelId, EmojiId, GuildId, MessageId, RoleId, WebhookId,
};
use crate::domain::undefined::UndefinedOr;

/// Discord message type.
///
/// Types this crate does not list are kept as [`MessageKind::Other`] rather
/// than folded into a known one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum MessageKind {
    #[default]
    Default,
    RecipientAdd,
    RecipientRemove,
    Call,
    ChannelNameChange,
    ChannelIconChange,
    ChannelPinnedMessage,
    UserJoin,
    GuildBoost,
    GuildBoostTier1,
    GuildBoostTier2,
    GuildBoostTier3,
    ChannelFollowAdd,
    GuildDiscoveryDisqualified,
    GuildDiscoveryRequalified,
    ThreadCreated,
    Reply,
    ChatInputCommand,
    ThreadStarterMessage,
    GuildInviteReminder,
    ContextMenuCommand,
    AutoModerationAction,
    /// A type this crate does not know, with its raw value.
    Other(u8),
}

impl From<u8> for MessageKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Default,
            1 => Self::RecipientAdd,
            2 => Self::RecipientRemove,
            3 => Self::Call,
            4 => Self::ChannelNameChange,
            5 => Self::ChannelIconChange,
            6 => Self::ChannelPinnedMessage,
            7 => Self::UserJoin,
            8 => Self::GuildBoost,
            9 => Self::GuildBoostTier1,
            10 => Self::GuildBoostTier2,
            11 => Self::GuildBoostTier3,
            12 => Self::ChannelFollowAdd,
            14 => Self::GuildDiscoveryDisqualified,
            15 => Self::GuildDiscoveryRequalified,
            18 => Self::ThreadCreated,
            19 => Self::Reply,
            20 => Self::ChatInputCommand,
            21 => Self::ThreadStarterMessage,
            22 => Self::GuildInviteReminder,
            23 => Self::ContextMenuCommand,
            24 => Self::AutoModerationAction,
            other => Self::Other(other),
        }
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> Self {
        kind.as_u8()
    }
}

impl MessageKind {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::RecipientAdd => 1,
            Self::RecipientRemove => 2,
            Self::Call => 3,
            Self::ChannelNameChange => 4,
            Self::ChannelIconChange => 5,
            Self::ChannelPinnedMessage => 6,
            Self::UserJoin => 7,
            Self::GuildBoost => 8,
            Self::GuildBoostTier1 => 9,
            Self::GuildBoostTier2 => 10,
            Self::GuildBoostTier3 => 11,
            Self::ChannelFollowAdd => 12,
            Self::GuildDiscoveryDisqualified => 14,
            Self::GuildDiscoveryRequalified => 15,
            Self::ThreadCreated => 18,
            Self::Reply => 19,
            Self::ChatInputCommand => 20,
            Self::ThreadStarterMessage => 21,
            Self::GuildInviteReminder => 22,
            Self::ContextMenuCommand => 23,
            Self::AutoModerationAction => 24,
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns true if this is a regular user message.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        matches!(
            self,
            Self::Default | Self::Reply | Self::ChatInputCommand | Self::ContextMenuCommand
        )
    }

    /// Returns true if this is a known system message type.
    ///
    /// Unknown types are neither regular nor system.
    #[must_use]
    pub const fn is_system(self) -> bool {
        self.is_known() && !self.is_regular()
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for MessageKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

bitflags::bitflags! {
    /// Flags attached to a message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u64 {
        const CROSSPOSTED = 1 << 0;
        const IS_CROSSPOST = 1 << 1;
        const SUPPRESS_EMBEDS = 1 << 2;
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        const URGENT = 1 << 4;
        const HAS_THREAD = 1 << 5;
        const EPHEMERAL = 1 << 6;
        const LOADING = 1 << 7;
        const FAILED_TO_MENTION_SOME_ROLES_IN_THREAD = 1 << 8;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
        const IS_VOICE_MESSAGE = 1 << 13;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// Discord message attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Attachment {
    id: AttachmentId,
    filename: String,
    size: u64,
    url: String,
    #[serde(default)]
    proxy_url: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[allow(missing_docs)]
impl Attachment {
    #[must_use]
    pub fn new(
        id: impl Into<AttachmentId>,
        filename: impl Into<String>,
        size: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            size,
            url: url.into(),
            proxy_url: None,
            content_type: None,
            width: None,
            height: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub const fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Width and height, only present for images and videos.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// Footer of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Image, thumbnail or video of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EmbedMedia {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Author block of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A name/value field of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Rich embed attached to a message.
///
/// Every part is optional on the wire; link previews Discord generates after
/// the fact often carry little more than a URL and a thumbnail.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Returns true if the embed carries no visible content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.thumbnail.is_none()
            && self.video.is_none()
            && self.author.is_none()
            && self.footer.is_none()
            && self.fields.is_empty()
    }
}

/// Reference to another message (replies, crossposts, pins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MessageReference {
    #[serde(default)]
    message_id: Option<MessageId>,
    #[serde(default)]
    channel_id: Option<ChannelId>,
    #[serde(default)]
    guild_id: Option<GuildId>,
}

#[allow(missing_docs)]
impl MessageReference {
    #[must_use]
    pub const fn new(message_id: Option<MessageId>, channel_id: Option<ChannelId>) -> Self {
        Self {
            message_id,
            channel_id,
            guild_id: None,
        }
    }

    #[must_use]
    pub const fn with_guild_id(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    #[must_use]
    pub const fn message_id(&self) -> Option<MessageId> {
        self.message_id
    }

    #[must_use]
    pub const fn channel_id(&self) -> Option<ChannelId> {
        self.channel_id
    }

    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }
}

/// Emoji used in a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawReactionEmoji", into = "RawReactionEmoji")]
pub enum ReactionEmoji {
    /// A guild's custom emoji. The name is missing when the emoji was deleted.
    Custom {
        /// Emoji id.
        id: EmojiId,
        /// Emoji name.
        name: Option<String>,
        /// Whether the emoji is animated.
        animated: bool,
    },
    /// A standard unicode emoji.
    Unicode {
        /// The emoji itself.
        name: String,
    },
}

impl ReactionEmoji {
    /// Text usable in message content to render this emoji.
    #[must_use]
    pub fn mention(&self) -> String {
        match self {
            Self::Custom { id, name, animated } => {
                let prefix = if *animated { "a" } else { "" };
                format!("<{prefix}:{}:{id}>", name.as_deref().unwrap_or("_"))
            }
            Self::Unicode { name } => name.clone(),
        }
    }

    /// Emoji form used in reaction REST routes.
    #[must_use]
    pub fn url_name(&self) -> String {
        match self {
            Self::Custom { id, name, .. } => {
                format!("{}:{id}", name.as_deref().unwrap_or("_"))
            }
            Self::Unicode { name } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawReactionEmoji {
    #[serde(default)]
    id: Option<EmojiId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    animated: bool,
}

impl From<RawReactionEmoji> for ReactionEmoji {
    fn from(raw: RawReactionEmoji) -> Self {
        match raw.id {
            Some(id) => Self::Custom {
                id,
                name: raw.name,
                animated: raw.animated,
            },
            None => Self::Unicode {
                name: raw.name.unwrap_or_default(),
            },
        }
    }
}

impl From<ReactionEmoji> for RawReactionEmoji {
    fn from(emoji: ReactionEmoji) -> Self {
        match emoji {
            ReactionEmoji::Custom { id, name, animated } => Self {
                id: Some(id),
                name,
                animated,
            },
            ReactionEmoji::Unicode { name } => Self {
                id: None,
                name: Some(name),
                animated: false,
            },
        }
    }
}

/// Aggregated reactions of one emoji on a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Reaction {
    pub count: u32,
    #[serde(default)]
    pub me: bool,
    pub emoji: ReactionEmoji,
}

/// A message whose every field is known.
///
/// Received through `MESSAGE_CREATE` or fetched over REST. Updates to an
/// existing message arrive as a [`PartialMessage`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Message {
    id: MessageId,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
    author: User,
    member: Option<Member>,
    content: String,
    timestamp: DateTime<Utc>,
    edited_timestamp: Option<DateTime<Utc>>,
    tts: bool,
    mention_everyone: bool,
    mentions: Vec<User>,
    mention_roles: Vec<RoleId>,
    attachments: Vec<Attachment>,
    embeds: Vec<Embed>,
    reactions: Vec<Reaction>,
    pinned: bool,
    webhook_id: Option<WebhookId>,
    kind: MessageKind,
    flags: MessageFlags,
    application_id: Option<ApplicationId>,
    reference: Option<MessageReference>,
    referenced: Option<Box<Self>>,
}

#[allow(missing_docs)]
impl Message {
    #[must_use]
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author: User,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            author,
            member: None,
            content: content.into(),
            timestamp,
            edited_timestamp: None,
            tts: false,
            mention_everyone: false,
            mentions: Vec::new(),
            mention_roles: Vec::new(),
            attachments: Vec::new(),
            embeds: Vec::new(),
            reactions: Vec::new(),
            pinned: false,
            webhook_id: None,
            kind: MessageKind::Default,
            flags: MessageFlags::empty(),
            application_id: None,
            reference: None,
            referenced: None,
        }
    }

    #[must_use]
    pub const fn with_guild_id(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: MessageFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    #[must_use]
    pub const fn with_mention_everyone(mut self, mention_everyone: bool) -> Self {
        self.mention_everyone = mention_everyone;
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    #[must_use]
    pub fn with_embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = embeds;
        self
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: MessageReference) -> Self {
        self.reference = Some(reference);
        self
    }

    #[must_use]
    pub fn with_referenced(mut self, message: Self) -> Self {
        self.referenced = Some(Box::new(message));
        self
    }

    #[must_use]
    pub const fn with_edited_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.edited_timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub const fn with_webhook_id(mut self, webhook_id: WebhookId) -> Self {
        self.webhook_id = Some(webhook_id);
        self
    }

    #[must_use]
    pub const fn with_application_id(mut self, application_id: ApplicationId) -> Self {
        self.application_id = Some(application_id);
        self
    }

    #[must_use]
    pub fn with_mentions(mut self, mentions: Vec<User>) -> Self {
        self.mentions = mentions;
        self
    }

    #[must_use]
    pub fn with_mention_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.mention_roles = roles;
        self
    }

    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Guild the message was sent in.
    ///
    /// `None` for direct messages, and also for guild messages fetched over
    /// REST, since Discord does not include the field there.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    #[must_use]
    pub const fn author(&self) -> &User {
        &self.author
    }

    /// Guild member of the author, for guild messages from real users.
    #[must_use]
    pub const fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn edited_timestamp(&self) -> Option<DateTime<Utc>> {
        self.edited_timestamp
    }

    #[must_use]
    pub const fn is_tts(&self) -> bool {
        self.tts
    }

    #[must_use]
    pub const fn mentions_everyone(&self) -> bool {
        self.mention_everyone
    }

    #[must_use]
    pub fn mentions(&self) -> &[User] {
        &self.mentions
    }

    #[must_use]
    pub fn mention_roles(&self) -> &[RoleId] {
        &self.mention_roles
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[must_use]
    pub const fn webhook_id(&self) -> Option<WebhookId> {
        self.webhook_id
    }

    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub const fn flags(&self) -> MessageFlags {
        self.flags
    }

    #[must_use]
    pub const fn application_id(&self) -> Option<ApplicationId> {
        self.application_id
    }

    #[must_use]
    pub const fn reference(&self) -> Option<&MessageReference> {
        self.reference.as_ref()
    }

    #[must_use]
    pub fn referenced(&self) -> Option<&Self> {
        self.referenced.as_deref()
    }

    #[must_use]
    pub const fn is_webhook(&self) -> bool {
        self.webhook_id.is_some()
    }

    /// True if a person typed this message: not a bot, not Discord's system
    /// account, and not sent through a webhook.
    #[must_use]
    pub const fn is_human(&self) -> bool {
        !self.author.is_bot() && !self.author.is_system() && self.webhook_id.is_none()
    }

    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }

    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.kind == MessageKind::Reply
    }

    #[must_use]
    pub const fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Jump URL for the message.
    #[must_use]
    pub fn link(&self) -> String {
        message_link(self.guild_id, self.channel_id, self.id)
    }

    /// Merges the fields an update carried into this message.
    ///
    /// Fields the update left undefined keep their current value; a null
    /// `edited_timestamp` clears it. The update must refer to this message.
    pub fn apply_update(&mut self, update: &PartialMessage) {
        debug_assert_eq!(self.id, update.id);

        if self.guild_id.is_none() {
            self.guild_id = update.guild_id;
        }
        if let UndefinedOr::Defined(author) = &update.author {
            self.author = author.clone();
        }
        if let UndefinedOr::Defined(member) = &update.member {
            self.member = Some(member.clone());
        }
        if let UndefinedOr::Defined(content) = &update.content {
            self.content.clone_from(content);
        }
        if let UndefinedOr::Defined(timestamp) = update.timestamp {
            self.timestamp = timestamp;
        }
        if let UndefinedOr::Defined(edited) = update.edited_timestamp {
            self.edited_timestamp = edited;
        }
        if let UndefinedOr::Defined(tts) = update.tts {
            self.tts = tts;
        }
        if let UndefinedOr::Defined(everyone) = update.mention_everyone {
            self.mention_everyone = everyone;
        }
        if let UndefinedOr::Defined(mentions) = &update.mentions {
            self.mentions.clone_from(mentions);
        }
        if let UndefinedOr::Defined(roles) = &update.mention_roles {
            self.mention_roles.clone_from(roles);
        }
        if let UndefinedOr::Defined(attachments) = &update.attachments {
            self.attachments.clone_from(attachments);
        }
        if let UndefinedOr::Defined(embeds) = &update.embeds {
            self.embeds.clone_from(embeds);
        }
        if let UndefinedOr::Defined(reactions) = &update.reactions {
            self.reactions.clone_from(reactions);
        }
        if let UndefinedOr::Defined(pinned) = update.pinned {
            self.pinned = pinned;
        }
        if let UndefinedOr::Defined(webhook_id) = update.webhook_id {
            self.webhook_id = webhook_id;
        }
        if let UndefinedOr::Defined(kind) = update.kind {
            self.kind = kind;
        }
        if let UndefinedOr::Defined(flags) = update.flags {
            self.flags = flags;
        }
        if let UndefinedOr::Defined(application_id) = update.application_id {
            self.application_id = application_id;
        }
        if let UndefinedOr::Defined(reference) = &update.reference {
            self.reference.clone_from(reference);
        }
        if let UndefinedOr::Defined(referenced) = &update.referenced {
            self.referenced.clone_from(referenced);
        }
    }
}

pub(super) fn message_link(
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
    message_id: MessageId,
) -> String {
    let guild = guild_id.map_or_else(|| "@me".to_string(), |id| id.to_string());
    format!("https://discord.com/channels/{guild}/{channel_id}/{message_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_author() -> User {
        User::new(123_u64, "testuser", "0", None, false)
    }

    fn create_test_message() -> Message {
        Message::new(1_u64, 100_u64, create_test_author(), "Hello, world!", Utc::now())
    }

    #[test]
    fn test_message_creation() {
        let message = create_test_message();

        assert_eq!(message.id().as_u64(), 1);
        assert_eq!(message.channel_id().as_u64(), 100);
        assert_eq!(message.content(), "Hello, world!");
        assert_eq!(message.author().username(), "testuser");
        assert!(!message.is_edited());
        assert!(!message.is_reply());
        assert!(message.guild_id().is_none());
    }

    #[test]
    fn test_message_with_reply() {
        let referenced = create_test_message();
        let reply = Message::new(2_u64, 100_u64, create_test_author(), "Reply", Utc::now())
            .with_kind(MessageKind::Reply)
            .with_reference(MessageReference::new(Some(MessageId(1)), Some(ChannelId(100))))
            .with_referenced(referenced);

        assert!(reply.is_reply());
        assert_eq!(reply.referenced().map(Message::id), Some(MessageId(1)));
        assert_eq!(
            reply.reference().and_then(MessageReference::message_id),
            Some(MessageId(1))
        );
    }

    #[test]
    fn test_is_webhook_and_is_human() {
        let plain = create_test_message();
        assert!(!plain.is_webhook());
        assert!(plain.is_human());

        let hooked = create_test_message().with_webhook_id(WebhookId(9));
        assert!(hooked.is_webhook());
        assert!(!hooked.is_human());

        let bot = Message::new(
            3_u64,
            100_u64,
            User::new(5_u64, "bot", "0", None, true),
            "beep",
            Utc::now(),
        );
        assert!(!bot.is_human());

        let system = Message::new(
            4_u64,
            100_u64,
            User::new(6_u64, "Discord", "0", None, false).with_system(true),
            "notice",
            Utc::now(),
        );
        assert!(!system.is_human());
    }

    #[test]
    fn test_link() {
        let dm = create_test_message();
        assert_eq!(dm.link(), "https://discord.com/channels/@me/100/1");

        let guild = create_test_message().with_guild_id(GuildId(7));
        assert_eq!(guild.link(), "https://discord.com/channels/7/100/1");
    }

    #[test]
    fn test_message_kind_is_regular() {
        assert!(MessageKind::Default.is_regular());
        assert!(MessageKind::Reply.is_regular());
        assert!(!MessageKind::UserJoin.is_regular());
        assert!(MessageKind::UserJoin.is_system());
        assert_eq!(MessageKind::from(19), MessageKind::Reply);
    }

    #[test]
    fn test_unknown_message_kind_is_kept() {
        let kind: MessageKind = serde_json::from_str("46").unwrap();

        assert_eq!(kind, MessageKind::Other(46));
        assert!(!kind.is_known());
        assert!(!kind.is_regular());
        assert!(!kind.is_system());
        assert_eq!(u8::from(kind), 46);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "46");
    }

    #[test]
    fn test_attachment_is_image() {
        let image = Attachment::new(1_u64, "photo.jpg", 1000, "https://example.com/photo.jpg")
            .with_content_type("image/jpeg")
            .with_dimensions(640, 480);
        let file = Attachment::new(2_u64, "document.pdf", 2000, "https://example.com/doc.pdf")
            .with_content_type("application/pdf");

        assert!(image.is_image());
        assert_eq!(image.dimensions(), Some((640, 480)));
        assert!(!file.is_image());
        assert_eq!(file.dimensions(), None);
    }

    #[test]
    fn test_reaction_emoji_wire_forms() {
        let custom: ReactionEmoji =
            serde_json::from_str(r#"{"id": "41771983429993937", "name": "LUL", "animated": true}"#)
                .unwrap();
        assert_eq!(custom.mention(), "<a:LUL:41771983429993937>");
        assert_eq!(custom.url_name(), "LUL:41771983429993937");

        let unicode: ReactionEmoji = serde_json::from_str(r#"{"id": null, "name": "🔥"}"#).unwrap();
        assert_eq!(unicode, ReactionEmoji::Unicode { name: "🔥".into() });
        assert_eq!(unicode.mention(), "🔥");
    }

    #[test]
    fn test_embed_is_empty() {
        assert!(Embed::default().is_empty());

        let preview = Embed {
            url: Some("https://example.com".into()),
            ..Embed::default()
        };
        assert!(preview.is_empty());

        let titled = Embed {
            title: Some("Title".into()),
            ..Embed::default()
        };
        assert!(!titled.is_empty());
    }

    #[test]
    fn test_flags_keep_unknown_bits() {
        let flags: MessageFlags = serde_json::from_str("65540").unwrap();
        assert!(flags.contains(MessageFlags::SUPPRESS_EMBEDS));
        assert_eq!(flags.bits(), 65540);
    }
}
