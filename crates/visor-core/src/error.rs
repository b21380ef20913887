//! Error taxonomy for gateway calls and locally checked preconditions.
//!
//! # Design
//! - Keep display strings constant; context travels in fields.
//! - Gateway errors are propagated unmodified; controllers turn them into
//!   [`Notice`](crate::notice::Notice) values instead of failing the screen.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed transport error so the core stays independent of any HTTP client.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures raised by a [`RecordGateway`](crate::gateway::RecordGateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No usable response arrived (connect, DNS, timeout, unreadable body).
    #[error("network request failed")]
    Network {
        /// Gateway action that failed.
        operation: &'static str,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },
    /// The endpoint answered with `success: false`.
    #[error("remote endpoint reported a failure")]
    Api {
        /// Gateway action that failed.
        operation: &'static str,
        /// Server supplied message, empty when none was sent.
        message: String,
        /// Identifier the server tried to match, when it reports one.
        debug_id: Option<String>,
    },
}

impl GatewayError {
    /// Wrap a transport error.
    pub fn network(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Network {
            operation,
            source: source.into(),
        }
    }

    /// Build an API failure from the response envelope fields.
    pub fn api(
        operation: &'static str,
        message: Option<String>,
        debug_id: Option<String>,
    ) -> Self {
        Self::Api {
            operation,
            message: message.unwrap_or_default(),
            debug_id: debug_id.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Gateway action the error belongs to.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Network { operation, .. } | Self::Api { operation, .. } => operation,
        }
    }

    /// Human-readable detail, including the transport cause for network errors.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Network { source, .. } => source.to_string(),
            Self::Api { message, .. } if message.trim().is_empty() => {
                "no message from server".to_string()
            }
            Self::Api { message, .. } => message.clone(),
        }
    }
}

/// Preconditions checked locally before any gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The record has no linked transcript document.
    #[error("record has no transcript")]
    MissingTranscript {
        /// Record that was opened.
        record_id: String,
    },
    /// The id is not in the held collection.
    #[error("record not found")]
    UnknownRecord {
        /// Requested record id.
        record_id: String,
    },
    /// An edit operation was requested with no record in edit mode.
    #[error("no record is being edited")]
    NotEditing,
    /// A save is already in flight.
    #[error("a save is already in progress")]
    SaveInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn api_error_drops_blank_debug_id() {
        let err = GatewayError::api("update", Some("row missing".into()), Some("  ".into()));
        match err {
            GatewayError::Api {
                message, debug_id, ..
            } => {
                assert_eq!(message, "row missing");
                assert_eq!(debug_id, None);
            }
            GatewayError::Network { .. } => panic!("expected api error"),
        }
    }

    #[test]
    fn detail_exposes_transport_cause() {
        let err = GatewayError::network("read", io::Error::other("connection refused"));
        assert_eq!(err.to_string(), "network request failed");
        assert_eq!(err.detail(), "connection refused");
        assert_eq!(err.operation(), "read");
        assert!(err.source().is_some());
    }

    #[test]
    fn detail_falls_back_when_server_sends_no_message() {
        let err = GatewayError::api("getText", None, None);
        assert_eq!(err.detail(), "no message from server");
    }
}
