//! Output adapters for decoded events.

mod stream_sink;

pub use stream_sink::{StreamSink, tri_state_label};
