//! Event sink error types.

use thiserror::Error;

/// Errors raised while writing inspected events to an output.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SinkError {
    #[error("failed to write event: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode event: {message}")]
    Encoding { message: String },

    #[error("sink is closed")]
    Closed,
}

impl SinkError {
    /// Creates encoding error.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Returns true for a reader that went away, such as a closed pipe.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::BrokenPipe)
            || matches!(self, Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_pipe_detection() {
        let err = SinkError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(err.is_broken_pipe());
        assert!(SinkError::Closed.is_broken_pipe());
        assert!(!SinkError::encoding("bad").is_broken_pipe());
    }
}
