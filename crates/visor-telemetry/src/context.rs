//! Per-command span context.

use tracing::{Span, info_span};
use uuid::Uuid;

use crate::init::build_sha;

/// Identifiers attached to one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    /// Command name (`ls`, `note`, `read`, `shell`).
    pub command: &'static str,
    /// Random id correlating the log lines of one invocation.
    pub trace_id: Uuid,
}

impl CommandContext {
    /// Fresh context with a random trace id.
    #[must_use]
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            trace_id: Uuid::new_v4(),
        }
    }
}

/// Root span for a command; every gateway span nests beneath it.
#[must_use]
pub fn command_span(context: &CommandContext) -> Span {
    info_span!(
        "command",
        command = context.command,
        trace_id = %context.trace_id,
        build_sha = %build_sha(),
    )
}
