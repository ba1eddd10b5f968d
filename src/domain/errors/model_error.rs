//! Model construction error types.

use thiserror::Error;

/// Errors raised while building model objects from wire data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ModelError {
    #[error("required field `{field}` was not provided")]
    MissingField { field: &'static str },

    #[error("invalid snowflake: {value:?}")]
    InvalidSnowflake { value: String },

    #[error("invalid timestamp for `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl ModelError {
    /// Creates missing field error.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates invalid snowflake error.
    #[must_use]
    pub fn invalid_snowflake(value: impl Into<String>) -> Self {
        Self::InvalidSnowflake {
            value: value.into(),
        }
    }

    /// Creates invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field,
            value: value.into(),
        }
    }

    /// Returns the field name the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidTimestamp { field, .. } => Some(*field),
            Self::InvalidSnowflake { .. } => None,
        }
    }
}
