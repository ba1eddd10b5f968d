use thiserror::Error;

use super::gateway::GatewayError;
use super::http::HttpError;
use crate::domain::errors::ModelError;

/// Any error raised while talking to Discord or decoding what it sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DiscordError {
    #[error("http error: {0}")]
    Http(#[from] HttpError),

    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl DiscordError {
    /// Returns true if the data Discord sent could not be decoded.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        match self {
            Self::Gateway(err) => err.is_malformed(),
            Self::Model(_) => true,
            Self::Http(_) => false,
        }
    }

    /// Returns true if retrying or resuming may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => err.is_retryable(),
            Self::Gateway(err) => err.can_resume(),
            Self::Model(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::discord::http::{Method, Resource};

    #[test]
    fn test_conversions_and_classification() {
        let http: DiscordError =
            HttpError::from_response(Resource::new(Method::Get, "/gateway"), 502, "").into();
        assert!(http.is_transient());
        assert!(!http.is_decode_error());

        let gateway: DiscordError = GatewayError::serialization("bad json").into();
        assert!(gateway.is_decode_error());
        assert!(!gateway.is_transient());

        let model: DiscordError = ModelError::missing("author").into();
        assert!(model.is_decode_error());
        assert_eq!(
            model.to_string(),
            "model error: required field `author` was not provided"
        );
    }

    #[test]
    fn test_closed_gateway_is_transient_when_resumable() {
        let err = DiscordError::from(GatewayError::closed(4000, "unknown"));
        assert!(err.is_transient());
        assert!(!err.is_decode_error());
    }
}
