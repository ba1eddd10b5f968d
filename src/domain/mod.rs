//! Domain layer with the Discord model and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Snowflake ids.
pub mod snowflake;
pub mod undefined;

pub use entities::{Member, Message, PartialMessage, User};
pub use errors::{ModelError, SinkError};
pub use ports::{EventReport, EventSinkPort, MessageFacts};
pub use snowflake::{ChannelId, GuildId, MessageId, Snowflake, UserId};
pub use undefined::{UndefinedNoneOr, UndefinedOr};
