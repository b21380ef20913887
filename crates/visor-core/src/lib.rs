#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, unreachable_pub)]
#![allow(clippy::module_name_repetitions)]

//! Client-side state for browsing, searching, annotating, and reading the
//! records held by a remote spreadsheet service.
//!
//! Layout:
//! - `model.rs`: record shape and derived display fields
//! - `search.rs`: filter, ordering, and ingestion of listed records
//! - `edit.rs`: edit mode and the confirm-then-apply save protocol
//! - `reader.rs`: transcript reader view-state machine
//! - `screen.rs`: orchestrator composing the above
//! - `effect.rs` / `session.rs`: gateway calls and a sequential driver
//! - `gateway.rs` / `error.rs` / `notice.rs`: remote contract and failures

pub mod edit;
pub mod effect;
pub mod error;
pub mod gateway;
pub mod model;
pub mod notice;
pub mod reader;
pub mod screen;
pub mod search;
pub mod session;

pub use edit::{Draft, EditController, SaveOutcome, SaveRequest};
pub use effect::{Completion, Effect, RefreshTicket, run_effect};
pub use error::{BoxError, GatewayError, GatewayResult, ValidationError};
pub use gateway::RecordGateway;
pub use model::{
    FLAG_MARKER, MISSING_DATE, Record, RecordView, Status, Timestamp, format_timestamp,
    is_flagged, lenient_opt_string, lenient_string, resolve_display_name,
};
pub use notice::{Notice, NoticeKind};
pub use reader::{ReaderController, ReaderView, TranscriptRequest};
pub use screen::{Placeholder, Screen};
pub use search::{filter, ingest, record_matches, sort_by_fecha_desc};
pub use session::Session;
