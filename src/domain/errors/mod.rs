//! Domain error types.

mod model_error;
mod sink_error;

pub use model_error::ModelError;
pub use sink_error::SinkError;
