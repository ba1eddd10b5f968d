use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gateway API version the payload shapes follow.
pub const GATEWAY_VERSION: u8 = 10;

/// Opcode carried in the `op` field of every gateway payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOpcode {
    Dispatch = 0,
    Heartbeat = 1,
    Identify = 2,
    PresenceUpdate = 3,
    VoiceStateUpdate = 4,
    Resume = 6,
    Reconnect = 7,
    RequestGuildMembers = 8,
    InvalidSession = 9,
    Hello = 10,
    HeartbeatAck = 11,
    /// Undocumented; seen from older clients.
    GuildSync = 12,
    LazyRequest = 14,
}

impl GatewayOpcode {
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Dispatch),
            1 => Some(Self::Heartbeat),
            2 => Some(Self::Identify),
            3 => Some(Self::PresenceUpdate),
            4 => Some(Self::VoiceStateUpdate),
            6 => Some(Self::Resume),
            7 => Some(Self::Reconnect),
            8 => Some(Self::RequestGuildMembers),
            9 => Some(Self::InvalidSession),
            10 => Some(Self::Hello),
            11 => Some(Self::HeartbeatAck),
            12 => Some(Self::GuildSync),
            14 => Some(Self::LazyRequest),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true for opcodes only Discord sends.
    #[must_use]
    pub const fn is_receive_only(self) -> bool {
        matches!(
            self,
            Self::Dispatch | Self::Reconnect | Self::InvalidSession | Self::Hello | Self::HeartbeatAck
        )
    }
}

impl From<GatewayOpcode> for u8 {
    fn from(opcode: GatewayOpcode) -> Self {
        opcode.as_u8()
    }
}

bitflags::bitflags! {
    /// Gateway intents that decide which events a session receives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GatewayIntents: u64 {
        const GUILDS = 1 << 0;
        const GUILD_MEMBERS = 1 << 1;
        const GUILD_WEBHOOKS = 1 << 5;
        const GUILD_PRESENCES = 1 << 8;
        const GUILD_MESSAGES = 1 << 9;
        const GUILD_MESSAGE_REACTIONS = 1 << 10;
        const GUILD_MESSAGE_TYPING = 1 << 11;
        const DIRECT_MESSAGES = 1 << 12;
        const DIRECT_MESSAGE_REACTIONS = 1 << 13;
        const DIRECT_MESSAGE_TYPING = 1 << 14;
        const MESSAGE_CONTENT = 1 << 15;
    }
}

impl GatewayIntents {
    /// Intents needed to see every message event this crate decodes.
    #[must_use]
    pub const fn messages() -> Self {
        Self::GUILDS
            .union(Self::GUILD_MESSAGES)
            .union(Self::DIRECT_MESSAGES)
            .union(Self::MESSAGE_CONTENT)
    }

    #[must_use]
    pub const fn with_reactions(self) -> Self {
        self.union(Self::GUILD_MESSAGE_REACTIONS)
            .union(Self::DIRECT_MESSAGE_REACTIONS)
    }

    /// Intents under which Discord delivers the named dispatch event.
    ///
    /// Either the guild or the direct-message variant is enough. Events not
    /// gated by an intent return an empty set.
    #[must_use]
    pub fn for_event(event_name: &str) -> Self {
        match event_name {
            "MESSAGE_CREATE" | "MESSAGE_UPDATE" | "MESSAGE_DELETE" => {
                Self::GUILD_MESSAGES | Self::DIRECT_MESSAGES
            }
            "MESSAGE_DELETE_BULK" => Self::GUILD_MESSAGES,
            "MESSAGE_REACTION_ADD" | "MESSAGE_REACTION_REMOVE" | "MESSAGE_REACTION_REMOVE_ALL" => {
                Self::GUILD_MESSAGE_REACTIONS | Self::DIRECT_MESSAGE_REACTIONS
            }
            _ => Self::empty(),
        }
    }

    /// Returns true if a session with these intents receives the event.
    #[must_use]
    pub fn receives(self, event_name: &str) -> bool {
        let required = Self::for_event(event_name);
        required.is_empty() || self.intersects(required)
    }
}

impl Serialize for GatewayIntents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for GatewayIntents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for opcode in [
            GatewayOpcode::Dispatch,
            GatewayOpcode::Heartbeat,
            GatewayOpcode::GuildSync,
            GatewayOpcode::Hello,
            GatewayOpcode::HeartbeatAck,
        ] {
            assert_eq!(GatewayOpcode::from_u8(opcode.as_u8()), Some(opcode));
        }
        assert_eq!(GatewayOpcode::from_u8(5), None);
    }

    #[test]
    fn test_message_intents_value() {
        let expected = (1 << 0) | (1 << 9) | (1 << 12) | (1 << 15);
        assert_eq!(GatewayIntents::messages().bits(), expected);
    }

    #[test]
    fn test_receives_event() {
        let intents = GatewayIntents::DIRECT_MESSAGES;
        assert!(intents.receives("MESSAGE_CREATE"));
        assert!(!intents.receives("MESSAGE_DELETE_BULK"));
        assert!(!intents.receives("MESSAGE_REACTION_ADD"));
        assert!(intents.with_reactions().receives("MESSAGE_REACTION_ADD"));
        assert!(GatewayIntents::empty().receives("READY"));
    }
}
