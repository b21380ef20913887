//! Shared error type, exit codes, and gateway construction for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::{Context, anyhow};
use url::Url;
use visor_core::{Notice, NoticeKind, Screen};
use visor_http::{GatewayConfig, HttpGateway};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Map a screen notice onto the exit-code split: local checks are
    /// validation errors, gateway failures are operational.
    pub(crate) fn from_notice(notice: &Notice) -> Self {
        match notice.kind {
            NoticeKind::Validation => Self::validation(notice.message.clone()),
            NoticeKind::Network | NoticeKind::Api => Self::failure(anyhow!(notice.message.clone())),
        }
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Drain the screen's notices, failing with the first one if any were raised.
pub(crate) fn take_failure(screen: &mut Screen) -> CliResult<()> {
    screen
        .take_notices()
        .first()
        .map_or(Ok(()), |notice| Err(CliError::from_notice(notice)))
}

pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

pub(crate) fn gateway_config(cli: &Cli) -> GatewayConfig {
    GatewayConfig {
        endpoint: cli.api_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
        post_encoding: cli.post_encoding,
    }
}

/// Build the HTTP gateway from the parsed flags.
pub(crate) fn build_gateway(cli: &Cli) -> CliResult<HttpGateway> {
    HttpGateway::new(gateway_config(cli))
        .context("failed to build HTTP client")
        .map_err(CliError::failure)
}
