//! Gateway configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the update body is labelled on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PostEncoding {
    /// JSON text sent as `text/plain`, which keeps the request "simple" for
    /// endpoints that reject cross-origin preflight.
    #[default]
    PlainText,
    /// JSON sent as `application/json`.
    Json,
}

impl PostEncoding {
    /// Configuration value for this encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plain",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for PostEncoding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PostEncoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::PlainText),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown post encoding '{other}' (expected plain or json)")),
        }
    }
}

/// Settings consumed by [`HttpGateway`](crate::HttpGateway).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Endpoint URL; actions are selected with query parameters or the body.
    pub endpoint: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Update body labelling.
    pub post_encoding: PostEncoding,
}

impl GatewayConfig {
    /// Configuration with default timeout and encoding.
    #[must_use]
    pub const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            post_encoding: PostEncoding::PlainText,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_encoding_parses_aliases() {
        assert_eq!("plain".parse::<PostEncoding>(), Ok(PostEncoding::PlainText));
        assert_eq!("TEXT".parse::<PostEncoding>(), Ok(PostEncoding::PlainText));
        assert_eq!(" json ".parse::<PostEncoding>(), Ok(PostEncoding::Json));
        assert!("form".parse::<PostEncoding>().is_err());
    }

    #[test]
    fn defaults_favour_plain_text() {
        let endpoint: Url = "https://example.test/exec".parse().expect("valid url");
        let config = GatewayConfig::new(endpoint);
        assert_eq!(config.post_encoding, PostEncoding::PlainText);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
