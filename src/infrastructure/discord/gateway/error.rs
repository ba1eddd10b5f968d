use std::fmt;

use thiserror::Error;

use super::constants::GatewayOpcode;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The connection was closed; displays as `NAME (code): reason`.
    #[error("{code}: {reason}")]
    Closed {
        code: GatewayCloseCode,
        reason: String,
    },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("protocol error: unexpected opcode {raw} ({opcode:?})")]
    UnexpectedOpcode {
        opcode: Option<GatewayOpcode>,
        raw: u8,
    },

    #[error("protocol error: {message}")]
    Protocol { message: String },
}

impl GatewayError {
    #[must_use]
    pub fn closed(code: u16, reason: impl Into<String>) -> Self {
        Self::Closed {
            code: GatewayCloseCode::from_u16(code),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn unexpected_opcode(raw: u8) -> Self {
        Self::UnexpectedOpcode {
            opcode: GatewayOpcode::from_u8(raw),
            raw,
        }
    }

    /// Returns true if the payload itself was malformed, as opposed to valid
    /// but not what the caller asked for.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Serialization { .. } | Self::Protocol { .. })
    }

    /// Returns true if a client could reconnect and resume after this error.
    #[must_use]
    pub const fn can_resume(&self) -> bool {
        match self {
            Self::Closed { code, .. } => code.is_resumable(),
            _ => false,
        }
    }

    #[must_use]
    pub const fn close_code(&self) -> Option<GatewayCloseCode> {
        if let Self::Closed { code, .. } = self {
            Some(*code)
        } else {
            None
        }
    }
}

/// Reason a gateway connection was closed.
///
/// Codes in `1000..2000` are sent by the client, codes in `4000..5000` by
/// Discord. Codes this crate does not know are kept as [`Self::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCloseCode {
    NormalClosure,
    GoingAway,
    ProtocolViolation,
    TypeError,
    InternalError,
    UnknownError,
    UnknownOpcode,
    DecodeError,
    NotAuthenticated,
    AuthenticationFailed,
    AlreadyAuthenticated,
    InvalidSequence,
    RateLimited,
    SessionTimedOut,
    InvalidShard,
    ShardingRequired,
    InvalidApiVersion,
    InvalidIntents,
    DisallowedIntents,
    Other(u16),
}

impl GatewayCloseCode {
    #[must_use]
    pub const fn from_u16(code: u16) -> Self {
        match code {
            1000 => Self::NormalClosure,
            1001 => Self::GoingAway,
            1002 => Self::ProtocolViolation,
            1003 => Self::TypeError,
            1011 => Self::InternalError,
            4000 => Self::UnknownError,
            4001 => Self::UnknownOpcode,
            4002 => Self::DecodeError,
            4003 => Self::NotAuthenticated,
            4004 => Self::AuthenticationFailed,
            4005 => Self::AlreadyAuthenticated,
            4007 => Self::InvalidSequence,
            4008 => Self::RateLimited,
            4009 => Self::SessionTimedOut,
            4010 => Self::InvalidShard,
            4011 => Self::ShardingRequired,
            4012 => Self::InvalidApiVersion,
            4013 => Self::InvalidIntents,
            4014 => Self::DisallowedIntents,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::NormalClosure => 1000,
            Self::GoingAway => 1001,
            Self::ProtocolViolation => 1002,
            Self::TypeError => 1003,
            Self::InternalError => 1011,
            Self::UnknownError => 4000,
            Self::UnknownOpcode => 4001,
            Self::DecodeError => 4002,
            Self::NotAuthenticated => 4003,
            Self::AuthenticationFailed => 4004,
            Self::AlreadyAuthenticated => 4005,
            Self::InvalidSequence => 4007,
            Self::RateLimited => 4008,
            Self::SessionTimedOut => 4009,
            Self::InvalidShard => 4010,
            Self::ShardingRequired => 4011,
            Self::InvalidApiVersion => 4012,
            Self::InvalidIntents => 4013,
            Self::DisallowedIntents => 4014,
            Self::Other(code) => code,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NormalClosure => "NORMAL_CLOSURE",
            Self::GoingAway => "GOING_AWAY",
            Self::ProtocolViolation => "PROTOCOL_VIOLATION",
            Self::TypeError => "TYPE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::UnknownOpcode => "UNKNOWN_OPCODE",
            Self::DecodeError => "DECODE_ERROR",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::AlreadyAuthenticated => "ALREADY_AUTHENTICATED",
            Self::InvalidSequence => "INVALID_SEQ",
            Self::RateLimited => "RATE_LIMITED",
            Self::SessionTimedOut => "SESSION_TIMEOUT",
            Self::InvalidShard => "INVALID_SHARD",
            Self::ShardingRequired => "SHARDING_REQUIRED",
            Self::InvalidApiVersion => "INVALID_API_VERSION",
            Self::InvalidIntents => "INVALID_INTENTS",
            Self::DisallowedIntents => "DISALLOWED_INTENTS",
            Self::Other(_) => "UNKNOWN_CLOSE_CODE",
        }
    }

    /// Returns true for codes the client itself sends.
    #[must_use]
    pub const fn is_client_side(self) -> bool {
        matches!(self.as_u16(), 1000..=1999)
    }

    #[must_use]
    pub const fn is_resumable(self) -> bool {
        matches!(
            self,
            Self::GoingAway
                | Self::UnknownError
                | Self::UnknownOpcode
                | Self::DecodeError
                | Self::NotAuthenticated
                | Self::InvalidSequence
                | Self::RateLimited
                | Self::SessionTimedOut
        )
    }

    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed
                | Self::InvalidShard
                | Self::ShardingRequired
                | Self::InvalidApiVersion
                | Self::InvalidIntents
                | Self::DisallowedIntents
        )
    }
}

impl From<u16> for GatewayCloseCode {
    fn from(code: u16) -> Self {
        Self::from_u16(code)
    }
}

impl From<GatewayCloseCode> for u16 {
    fn from(code: GatewayCloseCode) -> Self {
        code.as_u16()
    }
}

impl fmt::Display for GatewayCloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u16())
    }
}
