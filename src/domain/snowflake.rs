//! Snowflake identifiers.
//!
//! Discord sends ids as decimal strings (they overflow a JS number), but some
//! older payloads and test fixtures use plain integers, so every id accepts
//! either and always serializes back to a string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use super::errors::ModelError;

/// Milliseconds between the Unix epoch and the first second of 2015.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

/// Common behaviour of every snowflake id.
pub trait Snowflake: Copy {
    /// Returns the raw 64-bit value.
    fn get(self) -> u64;

    /// Returns when the object with this id was created.
    fn created_at(self) -> DateTime<Utc> {
        let millis = (self.get() >> 22) + DISCORD_EPOCH;
        i64::try_from(millis)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "self::wire")] pub u64);

        impl $name {
            /// Returns the underlying u64 value.
            #[must_use]
            pub const fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl Snowflake for $name {
            fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| ModelError::invalid_snowflake(s))
            }
        }
    };
}

snowflake_id!(
    /// Unique identifier for a Discord message.
    MessageId
);
snowflake_id!(
    /// Unique identifier for a Discord channel.
    ChannelId
);
snowflake_id!(
    /// Unique identifier for a Discord guild (server).
    GuildId
);
snowflake_id!(
    /// Unique identifier for a Discord user.
    UserId
);
snowflake_id!(
    /// Unique identifier for a webhook.
    WebhookId
);
snowflake_id!(
    /// Unique identifier for a guild role.
    RoleId
);
snowflake_id!(
    /// Unique identifier for a message attachment.
    AttachmentId
);
snowflake_id!(
    /// Unique identifier for an application.
    ApplicationId
);
snowflake_id!(
    /// Unique identifier for a custom emoji.
    EmojiId
);

/// String-or-integer wire format shared by all ids.
mod wire {
    use super::{de, fmt, Deserializer, Serializer, Visitor};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer snowflake")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value).map_err(|_| E::custom("negative snowflake"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse::<u64>().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}
