//! Port definitions for output adapters.

mod event_sink_port;

pub use event_sink_port::{EventReport, EventSinkPort, MessageFacts};
