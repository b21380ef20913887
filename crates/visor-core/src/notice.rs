//! User-facing notices raised by the controllers.

use serde::Serialize;

use crate::error::{GatewayError, ValidationError};

/// Classification of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Transport failure.
    Network,
    /// The endpoint reported a failure.
    Api,
    /// A local precondition was not met.
    Validation,
}

/// Message surfaced to the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Failure class.
    pub kind: NoticeKind,
    /// Rendered text.
    pub message: String,
}

impl Notice {
    /// Notice for a failed summary save.
    #[must_use]
    pub fn save_failed(error: &GatewayError) -> Self {
        match error {
            GatewayError::Network { .. } => Self {
                kind: NoticeKind::Network,
                message: format!(
                    "connection error while saving; check your network ({})",
                    error.detail()
                ),
            },
            GatewayError::Api { debug_id, .. } => Self {
                kind: NoticeKind::Api,
                message: format!(
                    "not saved: {} (looked up id: {})",
                    error.detail(),
                    debug_id.as_deref().unwrap_or("N/A")
                ),
            },
        }
    }

    /// Notice for a failed list fetch.
    #[must_use]
    pub fn list_failed(error: &GatewayError) -> Self {
        Self {
            kind: kind_of(error),
            message: format!("could not load records: {}", error.detail()),
        }
    }

    /// Inline message shown by the reader when a transcript fetch fails.
    #[must_use]
    pub fn transcript_failed(error: &GatewayError) -> Self {
        Self {
            kind: kind_of(error),
            message: format!("could not load transcript: {}", error.detail()),
        }
    }

    /// Notice for a rejected local precondition.
    #[must_use]
    pub fn validation(error: &ValidationError) -> Self {
        let message = match error {
            ValidationError::MissingTranscript { record_id } => {
                format!("record {record_id} has no transcript")
            }
            ValidationError::UnknownRecord { record_id } => {
                format!("record {record_id} is not in the list")
            }
            ValidationError::NotEditing | ValidationError::SaveInFlight => error.to_string(),
        };
        Self {
            kind: NoticeKind::Validation,
            message,
        }
    }
}

const fn kind_of(error: &GatewayError) -> NoticeKind {
    match error {
        GatewayError::Network { .. } => NoticeKind::Network,
        GatewayError::Api { .. } => NoticeKind::Api,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn save_failure_surfaces_debug_id() {
        let err = GatewayError::api(
            "update",
            Some("id not found".to_string()),
            Some("A-17".to_string()),
        );
        let notice = Notice::save_failed(&err);
        assert_eq!(notice.kind, NoticeKind::Api);
        assert_eq!(notice.message, "not saved: id not found (looked up id: A-17)");
    }

    #[test]
    fn save_failure_without_debug_id_reports_na() {
        let err = GatewayError::api("update", Some("locked".to_string()), None);
        assert!(Notice::save_failed(&err).message.ends_with("(looked up id: N/A)"));
    }

    #[test]
    fn network_failures_are_classified() {
        let err = GatewayError::network("read", io::Error::other("timed out"));
        let notice = Notice::list_failed(&err);
        assert_eq!(notice.kind, NoticeKind::Network);
        assert_eq!(notice.message, "could not load records: timed out");
    }

    #[test]
    fn missing_transcript_names_the_record() {
        let notice = Notice::validation(&ValidationError::MissingTranscript {
            record_id: "B".to_string(),
        });
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "record B has no transcript");
    }
}
