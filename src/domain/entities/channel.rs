//! Discord channel types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Discord channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChannelKind {
    /// Text channel.
    #[default]
    Text = 0,
    /// Direct message channel.
    Dm = 1,
    /// Voice channel.
    Voice = 2,
    /// Group direct message channel.
    GroupDm = 3,
    /// Category channel.
    Category = 4,
    /// Announcement channel.
    Announcement = 5,
    /// Announcement thread channel.
    AnnouncementThread = 10,
    /// Public thread channel.
    PublicThread = 11,
    /// Private thread channel.
    PrivateThread = 12,
    /// Stage voice channel.
    StageVoice = 13,
    /// Directory channel.
    Directory = 14,
    /// Forum channel.
    Forum = 15,
    /// Media channel.
    Media = 16,
}

impl ChannelKind {
    /// Returns true if messages can be posted directly in this channel.
    #[must_use]
    pub const fn is_text_based(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Dm
                | Self::Voice
                | Self::GroupDm
                | Self::Announcement
                | Self::AnnouncementThread
                | Self::PublicThread
                | Self::PrivateThread
                | Self::StageVoice
        )
    }

    /// Returns true for private channels, which never carry a guild id.
    #[must_use]
    pub const fn is_dm(self) -> bool {
        matches!(self, Self::Dm | Self::GroupDm)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }
}

impl From<u8> for ChannelKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::Announcement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::StageVoice,
            14 => Self::Directory,
            15 => Self::Forum,
            16 => Self::Media,
            _ => Self::Text,
        }
    }
}

impl Serialize for ChannelKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for ChannelKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_from_u8() {
        assert_eq!(ChannelKind::from(1), ChannelKind::Dm);
        assert_eq!(ChannelKind::from(11), ChannelKind::PublicThread);
        assert_eq!(ChannelKind::from(99), ChannelKind::Text);
    }

    #[test]
    fn test_channel_kind_predicates() {
        assert!(ChannelKind::GroupDm.is_dm());
        assert!(!ChannelKind::Text.is_dm());
        assert!(ChannelKind::PrivateThread.is_thread());
        assert!(ChannelKind::PrivateThread.is_text_based());
        assert!(!ChannelKind::Category.is_text_based());
        assert!(!ChannelKind::Forum.is_text_based());
    }
}
