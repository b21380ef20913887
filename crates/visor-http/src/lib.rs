#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, unreachable_pub)]

//! HTTP gateway to the spreadsheet endpoint.
//!
//! Layout: `config.rs` (endpoint, timeout, body encoding), `gateway.rs`
//! (`HttpGateway`), `error.rs` (transport causes).

pub mod config;
pub mod error;
pub mod gateway;

pub use config::{DEFAULT_TIMEOUT, GatewayConfig, PostEncoding};
pub use error::TransportError;
pub use gateway::HttpGateway;
