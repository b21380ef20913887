//! Transcript reader view-state machine.
//!
//! # Design
//! - The view is a tagged variant so a loading reader always has a record.
//! - Each open allocates a request id; completions for any other id are stale
//!   and dropped.
//! - Nothing is cached: closing discards the text, reopening fetches again.

use tracing::debug;

use crate::error::{GatewayResult, ValidationError};
use crate::model::Record;
use crate::notice::Notice;

/// Which screen is shown and what the reader holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReaderView {
    /// Searchable list/edit view.
    #[default]
    List,
    /// Transcript fetch in flight.
    Loading {
        /// Record being read.
        record: Record,
        /// Request whose completion is awaited.
        request_id: u64,
    },
    /// Transcript fetched.
    Loaded {
        /// Record being read.
        record: Record,
        /// Full transcript text.
        text: String,
    },
    /// Transcript fetch failed; the reader stays open with the message.
    Error {
        /// Record being read.
        record: Record,
        /// Human-readable failure description.
        message: String,
    },
}

impl ReaderView {
    /// Record shown by the reader, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&Record> {
        match self {
            Self::List => None,
            Self::Loading { record, .. }
            | Self::Loaded { record, .. }
            | Self::Error { record, .. } => Some(record),
        }
    }

    /// Whether the list view is shown.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}

/// Transcript fetch issued by [`ReaderController::open`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptRequest {
    /// Monotonic request id.
    pub request_id: u64,
    /// Record that was opened.
    pub record_id: String,
    /// Transcript document to fetch.
    pub txt_id: String,
}

/// Drives [`ReaderView`] transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReaderController {
    view: ReaderView,
    last_request_id: u64,
}

impl ReaderController {
    /// Current view.
    #[must_use]
    pub const fn view(&self) -> &ReaderView {
        &self.view
    }

    /// Open the reader for `record` and return the fetch to perform.
    ///
    /// Opening while another reader is showing or loading supersedes it.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingTranscript`] without changing state
    /// when the record has no transcript.
    pub fn open(&mut self, record: &Record) -> Result<TranscriptRequest, ValidationError> {
        let txt_id = record
            .transcript_id()
            .ok_or_else(|| ValidationError::MissingTranscript {
                record_id: record.id.clone(),
            })?
            .to_string();
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.view = ReaderView::Loading {
            record: record.clone(),
            request_id,
        };
        Ok(TranscriptRequest {
            request_id,
            record_id: record.id.clone(),
            txt_id,
        })
    }

    /// Apply a fetch result. Returns `false` when the result was stale.
    pub fn finish(&mut self, request: &TranscriptRequest, result: GatewayResult<String>) -> bool {
        let record = match &self.view {
            ReaderView::Loading { record, request_id } if *request_id == request.request_id => {
                record.clone()
            }
            _ => {
                debug!(
                    request_id = request.request_id,
                    record_id = %request.record_id,
                    "discarding stale transcript response"
                );
                return false;
            }
        };
        self.view = match result {
            Ok(text) => ReaderView::Loaded { record, text },
            Err(err) => ReaderView::Error {
                record,
                message: Notice::transcript_failed(&err).message,
            },
        };
        true
    }

    /// Return to the list, dropping whatever the reader held.
    pub fn close(&mut self) {
        self.view = ReaderView::List;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;

    fn with_transcript(id: &str, txt_id: &str) -> Record {
        Record {
            txt_id: Some(txt_id.to_string()),
            ..Record::new(id)
        }
    }

    #[test]
    fn open_without_transcript_keeps_list() {
        let mut reader = ReaderController::default();
        let err = reader.open(&Record::new("A")).expect_err("missing transcript");
        assert_eq!(
            err,
            ValidationError::MissingTranscript {
                record_id: "A".to_string()
            }
        );
        assert!(reader.view().is_list());
    }

    #[test]
    fn successful_fetch_loads_text() {
        let mut reader = ReaderController::default();
        let record = with_transcript("A", "doc-1");
        let request = reader.open(&record).expect("open reader");
        assert_eq!(request.txt_id, "doc-1");
        assert!(matches!(reader.view(), ReaderView::Loading { .. }));

        assert!(reader.finish(&request, Ok("hello".to_string())));
        assert_eq!(
            reader.view(),
            &ReaderView::Loaded {
                record,
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn failed_fetch_stays_in_reader() {
        let mut reader = ReaderController::default();
        let request = reader.open(&with_transcript("A", "doc-1")).expect("open reader");
        let err = GatewayError::api("getText", Some("doc gone".to_string()), None);
        assert!(reader.finish(&request, Err(err)));
        match reader.view() {
            ReaderView::Error { record, message } => {
                assert_eq!(record.id, "A");
                assert_eq!(message, "could not load transcript: doc gone");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn latest_open_wins_over_earlier_response() {
        let mut reader = ReaderController::default();
        let record = with_transcript("A", "doc-1");
        let first = reader.open(&record).expect("first open");
        let second = reader.open(&record).expect("second open");
        assert_ne!(first.request_id, second.request_id);

        assert!(reader.finish(&second, Ok("fresh".to_string())));
        assert!(!reader.finish(&first, Ok("stale".to_string())));
        assert!(matches!(reader.view(), ReaderView::Loaded { text, .. } if text == "fresh"));
    }

    #[test]
    fn response_after_close_is_discarded() {
        let mut reader = ReaderController::default();
        let request = reader.open(&with_transcript("A", "doc-1")).expect("open reader");
        reader.close();
        assert!(!reader.finish(&request, Ok("late".to_string())));
        assert!(reader.view().is_list());
    }

    #[test]
    fn response_for_other_record_is_discarded() {
        let mut reader = ReaderController::default();
        let first = reader.open(&with_transcript("A", "doc-1")).expect("open A");
        let _second = reader.open(&with_transcript("B", "doc-2")).expect("open B");
        assert!(!reader.finish(&first, Ok("text of A".to_string())));
        assert!(matches!(
            reader.view(),
            ReaderView::Loading { record, .. } if record.id == "B"
        ));
    }
}
