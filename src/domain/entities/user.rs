//! Discord user entities.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::snowflake::UserId;

const CDN_URL: &str = "https://cdn.discordapp.com";

bitflags::bitflags! {
    /// Public flags shown on a user's profile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserFlags: u64 {
        const STAFF = 1 << 0;
        const PARTNER = 1 << 1;
        const HYPESQUAD = 1 << 2;
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        const HYPESQUAD_BRAVERY = 1 << 6;
        const HYPESQUAD_BRILLIANCE = 1 << 7;
        const HYPESQUAD_BALANCE = 1 << 8;
        const PREMIUM_EARLY_SUPPORTER = 1 << 9;
        const TEAM_PSEUDO_USER = 1 << 10;
        const SYSTEM = 1 << 12;
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        const VERIFIED_BOT = 1 << 16;
        const VERIFIED_DEVELOPER = 1 << 17;
        const CERTIFIED_MODERATOR = 1 << 18;
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}

impl Serialize for UserFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for UserFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// Nitro subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum PremiumType {
    #[default]
    None = 0,
    NitroClassic = 1,
    Nitro = 2,
    NitroBasic = 3,
}

impl From<u8> for PremiumType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::NitroClassic,
            2 => Self::Nitro,
            3 => Self::NitroBasic,
            _ => Self::None,
        }
    }
}

impl Serialize for PremiumType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for PremiumType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

fn default_discriminator() -> String {
    "0".to_string()
}

/// A Discord user account, not bound to any guild.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(default = "default_discriminator")]
    discriminator: String,
    #[serde(default)]
    global_name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    bot: bool,
    #[serde(default)]
    system: bool,
    #[serde(default)]
    public_flags: UserFlags,
}

#[allow(missing_docs)]
impl User {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
        avatar: Option<String>,
        bot: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            global_name: None,
            avatar,
            bot,
            system: false,
            public_flags: UserFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    #[must_use]
    pub const fn with_system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    #[must_use]
    pub const fn with_public_flags(mut self, flags: UserFlags) -> Self {
        self.public_flags = flags;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    #[must_use]
    pub fn global_name(&self) -> Option<&str> {
        self.global_name.as_deref()
    }

    /// Avatar hash, if the user has set one.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    /// True for Discord's own system account (used for official notices).
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.system
    }

    #[must_use]
    pub const fn public_flags(&self) -> UserFlags {
        self.public_flags
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(ref global_name) = self.global_name {
            global_name.clone()
        } else if self.is_migrated() {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    /// Returns true once the user moved to the unique-username system.
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        self.discriminator == "0"
    }

    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// CDN URL for the user's custom avatar.
    ///
    /// Animated hashes (prefixed `a_`) resolve to a GIF.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        let hash = self.avatar.as_deref()?;
        let ext = if hash.starts_with("a_") { "gif" } else { "png" };
        Some(format!("{CDN_URL}/avatars/{}/{hash}.{ext}", self.id))
    }

    /// Index of the default avatar Discord shows when no custom one is set.
    #[must_use]
    pub fn default_avatar_index(&self) -> u64 {
        if self.is_migrated() {
            (self.id.as_u64() >> 22) % 6
        } else {
            self.discriminator.parse::<u64>().unwrap_or(0) % 5
        }
    }

    #[must_use]
    pub fn default_avatar_url(&self) -> String {
        format!(
            "{CDN_URL}/embed/avatars/{}.png",
            self.default_avatar_index()
        )
    }

    /// Custom avatar if set, otherwise the default one.
    #[must_use]
    pub fn effective_avatar_url(&self) -> String {
        self.avatar_url()
            .unwrap_or_else(|| self.default_avatar_url())
    }
}

/// The account the client is signed in as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnUser {
    #[serde(flatten)]
    user: User,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    mfa_enabled: bool,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    premium_type: PremiumType,
}

#[allow(missing_docs)]
impl OwnUser {
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self {
            user,
            verified: false,
            mfa_enabled: false,
            locale: None,
            premium_type: PremiumType::None,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified
    }

    #[must_use]
    pub const fn is_mfa_enabled(&self) -> bool {
        self.mfa_enabled
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    #[must_use]
    pub const fn premium_type(&self) -> PremiumType {
        self.premium_type
    }
}

impl std::ops::Deref for OwnUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(123_456_789_u64, "testuser", "1234", Some("abc123".into()), false);

        assert_eq!(user.id().as_u64(), 123_456_789);
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.discriminator(), "1234");
        assert_eq!(user.avatar(), Some("abc123"));
        assert!(!user.is_bot());
        assert!(!user.is_system());
    }

    #[test]
    fn test_display_name_legacy() {
        let user = User::new(123_u64, "olduser", "1234", None, false);
        assert_eq!(user.display_name(), "olduser#1234");
        assert!(!user.is_migrated());
    }

    #[test]
    fn test_display_name_with_global_name() {
        let user = User::new(123_u64, "handle", "0", None, false).with_global_name("Display Name");
        assert_eq!(user.display_name(), "Display Name");
    }

    #[test]
    fn test_avatar_url() {
        let still = User::new(80_u64, "a", "0", Some("abc".into()), false);
        let animated = User::new(80_u64, "a", "0", Some("a_abc".into()), false);
        let none = User::new(80_u64, "a", "0", None, false);

        assert_eq!(
            still.avatar_url().as_deref(),
            Some("https://cdn.discordapp.com/avatars/80/abc.png")
        );
        assert_eq!(
            animated.avatar_url().as_deref(),
            Some("https://cdn.discordapp.com/avatars/80/a_abc.gif")
        );
        assert!(none.avatar_url().is_none());
        assert!(none.effective_avatar_url().contains("/embed/avatars/"));
    }

    #[test]
    fn test_default_avatar_index() {
        let legacy = User::new(1_u64, "a", "0007", None, false);
        assert_eq!(legacy.default_avatar_index(), 2);

        let migrated = User::new(6_u64 << 22, "a", "0", None, false);
        assert_eq!(migrated.default_avatar_index(), 0);
    }

    #[test]
    fn test_deserialize_wire_user() {
        let json = r#"{
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "avatar": "8342729096ea3675442027381ff50dfe",
            "public_flags": 64
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id(), UserId(80_351_110_224_678_912));
        assert!(!user.is_bot());
        assert!(user.public_flags().contains(UserFlags::HYPESQUAD_BRAVERY));
        assert_eq!(user.mention(), "<@80351110224678912>");
    }

    #[test]
    fn test_deserialize_own_user() {
        let json = r#"{
            "id": "1",
            "username": "bot",
            "bot": true,
            "verified": true,
            "mfa_enabled": false,
            "premium_type": 2
        }"#;
        let own: OwnUser = serde_json::from_str(json).unwrap();

        assert!(own.is_bot());
        assert!(own.is_verified());
        assert!(!own.is_mfa_enabled());
        assert_eq!(own.premium_type(), PremiumType::Nitro);
        assert_eq!(own.discriminator(), "0");
    }

    #[test]
    fn test_unknown_flag_bits_are_kept() {
        let flags: UserFlags = serde_json::from_str("4194305").unwrap();
        assert!(flags.contains(UserFlags::STAFF | UserFlags::ACTIVE_DEVELOPER));
        assert_eq!(serde_json::to_string(&flags).unwrap(), "4194305");
    }
}
