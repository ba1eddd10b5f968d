//! Domain entity definitions.

mod channel;
mod member;
mod message;
mod partial_message;
mod user;

pub use channel::ChannelKind;
pub use member::Member;
pub use message::{
    Attachment, Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, Message, MessageFlags,
    MessageKind, MessageReference, Reaction, ReactionEmoji,
};
pub use partial_message::PartialMessage;
pub use user::{OwnUser, PremiumType, User, UserFlags};
