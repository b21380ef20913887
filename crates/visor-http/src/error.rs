//! Transport-level causes wrapped into [`GatewayError::Network`].

use reqwest::StatusCode;
use thiserror::Error;
use visor_core::GatewayError;

/// Why a request produced no usable envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed (connect, DNS, timeout, body read).
    #[error("request failed: {source}")]
    Request {
        /// Underlying client error.
        #[from]
        source: reqwest::Error,
    },
    /// Non-success status with a body that is not an envelope.
    #[error("unexpected status {status}")]
    Status {
        /// Status code returned by the endpoint.
        status: StatusCode,
    },
    /// Body was not the expected JSON envelope.
    #[error("invalid response body: {source}")]
    Decode {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// Request body could not be encoded.
    #[error("failed to encode request body: {source}")]
    Encode {
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Wrap into the gateway taxonomy.
    pub(crate) fn into_gateway(self, operation: &'static str) -> GatewayError {
        GatewayError::network(operation, self)
    }
}
