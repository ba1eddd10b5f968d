//! REST API error surface.

mod error;
mod resource;
mod status;

pub use error::HttpError;
pub use resource::{API_BASE_URL, Method, Resource, ResourceError};
pub use status::{HttpStatus, JsonErrorCode};
