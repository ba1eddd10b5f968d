mod codec;
mod constants;
mod error;
mod events;
mod payloads;

pub use codec::{EventParser, SequencedEvent};
pub use constants::{GATEWAY_VERSION, GatewayIntents, GatewayOpcode};
pub use error::{GatewayCloseCode, GatewayError, GatewayResult};
pub use events::{
    DispatchEvent, MessageCreateEvent, MessageDeleteBulkEvent, MessageDeleteEvent,
    MessageUpdateEvent, ReactionAddEvent, ReactionRemoveAllEvent, ReactionRemoveEvent, ReadyEvent,
};
pub use payloads::GatewayPayload;
