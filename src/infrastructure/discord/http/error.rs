//! REST error classification.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::resource::Resource;
use super::status::{HttpStatus, JsonErrorCode};

/// An error response from the REST API.
///
/// Server errors (5xx) are Discord's fault; client errors (4xx) point at the
/// request. The four common client statuses get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum HttpError {
    #[error("{resource}: {message}")]
    Server {
        resource: Resource,
        status: HttpStatus,
        message: String,
    },

    #[error("{resource}: {message}")]
    Client {
        resource: Resource,
        status: HttpStatus,
        code: Option<JsonErrorCode>,
        message: String,
    },

    #[error("{resource}: {message}")]
    BadRequest {
        resource: Resource,
        code: Option<JsonErrorCode>,
        message: String,
    },

    #[error("{resource}: {message}")]
    Unauthorized {
        resource: Resource,
        code: Option<JsonErrorCode>,
        message: String,
    },

    #[error("{resource}: {message}")]
    Forbidden {
        resource: Resource,
        code: Option<JsonErrorCode>,
        message: String,
    },

    #[error("{resource}: {message}")]
    NotFound {
        resource: Resource,
        code: Option<JsonErrorCode>,
        message: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<JsonErrorCode>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpError {
    /// Classifies a failed response.
    ///
    /// The body is read as Discord's `{"code": ..., "message": ...}` error
    /// object when it is one. Without a message, the status reason is used,
    /// e.g. `Internal Server Error`.
    #[must_use]
    pub fn from_response(resource: Resource, status: u16, body: &str) -> Self {
        let status = HttpStatus::from_u16(status);
        let body = if body.trim().is_empty() {
            ErrorBody::default()
        } else {
            serde_json::from_str(body).unwrap_or_else(|e| {
                debug!(%resource, error = %e, "Error body is not a Discord error object");
                ErrorBody::default()
            })
        };
        let code = body.code;
        let message = body.message.unwrap_or_else(|| status.reason());

        match status {
            status if status.is_server_error() => Self::Server {
                resource,
                status,
                message,
            },
            HttpStatus::BadRequest => Self::BadRequest {
                resource,
                code,
                message,
            },
            HttpStatus::Unauthorized => Self::Unauthorized {
                resource,
                code,
                message,
            },
            HttpStatus::Forbidden => Self::Forbidden {
                resource,
                code,
                message,
            },
            HttpStatus::NotFound => Self::NotFound {
                resource,
                code,
                message,
            },
            status => Self::Client {
                resource,
                status,
                code,
                message,
            },
        }
    }

    #[must_use]
    pub const fn status(&self) -> HttpStatus {
        match self {
            Self::Server { status, .. } | Self::Client { status, .. } => *status,
            Self::BadRequest { .. } => HttpStatus::BadRequest,
            Self::Unauthorized { .. } => HttpStatus::Unauthorized,
            Self::Forbidden { .. } => HttpStatus::Forbidden,
            Self::NotFound { .. } => HttpStatus::NotFound,
        }
    }

    /// Discord's JSON error code, if the body carried one.
    #[must_use]
    pub const fn json_code(&self) -> Option<JsonErrorCode> {
        match self {
            Self::Server { .. } => None,
            Self::Client { code, .. }
            | Self::BadRequest { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::Forbidden { code, .. }
            | Self::NotFound { code, .. } => *code,
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &Resource {
        match self {
            Self::Server { resource, .. }
            | Self::Client { resource, .. }
            | Self::BadRequest { resource, .. }
            | Self::Unauthorized { resource, .. }
            | Self::Forbidden { resource, .. }
            | Self::NotFound { resource, .. } => resource,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Server { message, .. }
            | Self::Client { message, .. }
            | Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. } => message,
        }
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_server_error() || self.status() == HttpStatus::TooManyRequests
    }
}
