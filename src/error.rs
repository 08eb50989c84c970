//! Error types for the session broker.

use thiserror::Error;

/// Errors raised by the session API facade and by broker configuration.
///
/// Adapter operations never return this type to their callers: they fold it
/// into a failure [`Response`](crate::Response) instead.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The request could not be delivered or the reply could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The session API rejected the request.
    #[error("service error ({code}): {message}")]
    Service {
        /// Vendor error code, e.g. `"NotFoundException"`.
        code: String,
        /// Human-readable message from the service.
        message: String,
    },

    /// A response was missing a field the broker needs.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// Failed to serialize or deserialize a protocol message.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Broker configuration is incomplete or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A request did not complete in time.
    #[error("operation timed out")]
    Timeout,
}

impl BrokerError {
    /// Shorthand for a [`BrokerError::Service`] error.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The message to report to callers.
    ///
    /// Service errors yield the service's own message unchanged; every other
    /// variant yields its display text.
    pub fn message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The vendor error code, if this is a service error.
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// A specialized [`Result`] type for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_verbatim() {
        let err = BrokerError::service("InternalServiceException", "Unknown Exception");
        assert_eq!(err.message(), "Unknown Exception");
        assert_eq!(err.service_code(), Some("InternalServiceException"));
        assert_eq!(
            err.to_string(),
            "service error (InternalServiceException): Unknown Exception"
        );
    }

    #[test]
    fn other_variants_use_display_text() {
        assert_eq!(BrokerError::Timeout.message(), "operation timed out");
        assert_eq!(
            BrokerError::MissingField("PlayerSession").message(),
            "response is missing `PlayerSession`"
        );
        assert!(BrokerError::Transport("boom".into()).service_code().is_none());
    }
}
