#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, unreachable_pub)]

//! Logging primitives shared by the Visor binaries.
//!
//! Logs go to stderr so command output on stdout stays machine readable.

pub mod context;
pub mod error;
pub mod init;

pub use context::{CommandContext, command_span};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
