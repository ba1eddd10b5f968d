//! Guild-bound member entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;
use crate::domain::snowflake::{GuildId, RoleId, UserId};

/// A user's membership in one guild.
///
/// The wrapped [`User`] is the same account in every guild; everything else is
/// specific to the guild the member was received for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    user: User,
    guild_id: GuildId,
    #[serde(default)]
    role_ids: Vec<RoleId>,
    #[serde(default)]
    nick: Option<String>,
    joined_at: DateTime<Utc>,
    #[serde(default)]
    premium_since: Option<DateTime<Utc>>,
    #[serde(default)]
    deaf: bool,
    #[serde(default)]
    mute: bool,
    #[serde(default)]
    pending: bool,
    #[serde(default)]
    communication_disabled_until: Option<DateTime<Utc>>,
}

#[allow(missing_docs)]
impl Member {
    #[must_use]
    pub const fn new(user: User, guild_id: GuildId, joined_at: DateTime<Utc>) -> Self {
        Self {
            user,
            guild_id,
            role_ids: Vec::new(),
            nick: None,
            joined_at,
            premium_since: None,
            deaf: false,
            mute: false,
            pending: false,
            communication_disabled_until: None,
        }
    }

    #[must_use]
    pub fn with_nick(mut self, nick: Option<String>) -> Self {
        self.nick = nick;
        self
    }

    #[must_use]
    pub fn with_role_ids(mut self, role_ids: Vec<RoleId>) -> Self {
        self.role_ids = role_ids;
        self
    }

    #[must_use]
    pub const fn with_premium_since(mut self, premium_since: Option<DateTime<Utc>>) -> Self {
        self.premium_since = premium_since;
        self
    }

    #[must_use]
    pub const fn with_voice_state(mut self, deaf: bool, mute: bool) -> Self {
        self.deaf = deaf;
        self.mute = mute;
        self
    }

    #[must_use]
    pub const fn with_pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    #[must_use]
    pub const fn with_communication_disabled_until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.communication_disabled_until = until;
        self
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id()
    }

    #[must_use]
    pub const fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    #[must_use]
    pub fn role_ids(&self) -> &[RoleId] {
        &self.role_ids
    }

    #[must_use]
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// When the member started boosting the guild, if they are boosting.
    #[must_use]
    pub const fn premium_since(&self) -> Option<DateTime<Utc>> {
        self.premium_since
    }

    #[must_use]
    pub const fn is_deaf(&self) -> bool {
        self.deaf
    }

    #[must_use]
    pub const fn is_mute(&self) -> bool {
        self.mute
    }

    /// True until the member passes membership screening.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub const fn communication_disabled_until(&self) -> Option<DateTime<Utc>> {
        self.communication_disabled_until
    }

    #[must_use]
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.role_ids.contains(&role_id)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.nick
            .clone()
            .unwrap_or_else(|| self.user.display_name())
    }

    #[must_use]
    pub fn mention(&self) -> String {
        if self.nick.is_some() {
            format!("<@!{}>", self.user.id())
        } else {
            self.user.mention()
        }
    }

    #[must_use]
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.communication_disabled_until
            .is_some_and(|until| until > now)
    }
}
