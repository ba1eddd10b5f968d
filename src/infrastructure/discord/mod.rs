//! Discord wire formats: gateway events and REST errors.

mod error;
pub mod gateway;
pub mod http;

pub use error::DiscordError;
pub use gateway::{
    DispatchEvent, EventParser, GatewayCloseCode, GatewayError, GatewayIntents, GatewayOpcode,
    GatewayPayload, SequencedEvent,
};
pub use http::{HttpError, HttpStatus, JsonErrorCode, Method, Resource};
