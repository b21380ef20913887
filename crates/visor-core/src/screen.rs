//! Single-screen view-state orchestrator.
//!
//! # Design
//! - Owns the record collection; only list completions replace it and only
//!   confirmed saves mutate it.
//! - Every gateway interaction is a begin step returning an [`Effect`] plus
//!   [`Screen::apply`] for the matching [`Completion`].
//! - The rendered projection is derived on demand from `records` and the
//!   search term.

use tracing::{debug, info, warn};

use crate::edit::EditController;
use crate::effect::{Completion, Effect, RefreshTicket};
use crate::error::ValidationError;
use crate::model::{Record, RecordView};
use crate::notice::Notice;
use crate::reader::{ReaderController, ReaderView};
use crate::search::{filter, ingest};

/// What the list area shows when it has no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// First load in progress.
    Loading,
    /// Nothing to show (no records or no matches).
    Empty,
}

/// Render-ready state of the screen.
#[derive(Clone, Debug, Default)]
pub struct Screen {
    records: Vec<Record>,
    search_term: String,
    edit: EditController,
    reader: ReaderController,
    notices: Vec<Notice>,
    last_refresh: u64,
    loading: bool,
}

impl Screen {
    /// Empty screen in list view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Held collection in list order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Look up a held record.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Filtered, display-ready rows.
    #[must_use]
    pub fn visible(&self) -> Vec<RecordView> {
        filter(&self.records, &self.search_term)
            .into_iter()
            .map(RecordView::from)
            .collect()
    }

    /// Placeholder for an empty list area, if one applies.
    #[must_use]
    pub fn placeholder(&self) -> Option<Placeholder> {
        if self.loading && self.records.is_empty() {
            Some(Placeholder::Loading)
        } else if !self.loading && self.visible().is_empty() {
            Some(Placeholder::Empty)
        } else {
            None
        }
    }

    /// Whether the most recent list fetch is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Edit/save state.
    #[must_use]
    pub const fn edit(&self) -> &EditController {
        &self.edit
    }

    /// Reader view state.
    #[must_use]
    pub const fn view(&self) -> &ReaderView {
        self.reader.view()
    }

    /// Pending notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Start a full list fetch.
    pub fn begin_refresh(&mut self) -> Effect {
        self.last_refresh += 1;
        self.loading = true;
        Effect::ListRecords(RefreshTicket(self.last_refresh))
    }

    /// Put the record `id` in edit mode.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownRecord`] when `id` is not held, or
    /// [`ValidationError::SaveInFlight`] while a save is pending.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), ValidationError> {
        let result = match self.records.iter().find(|record| record.id == id) {
            Some(record) => self.edit.begin(record),
            None => Err(ValidationError::UnknownRecord {
                record_id: id.to_string(),
            }),
        };
        self.note_rejection(result)
    }

    /// Replace the draft text of the record in edit mode.
    ///
    /// # Errors
    /// Returns [`ValidationError::NotEditing`] outside edit mode.
    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        let result = self.edit.update_draft(text);
        self.note_rejection(result)
    }

    /// Leave edit mode and discard the draft.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Start saving the draft. `None` when not editing or already saving.
    pub fn begin_save(&mut self) -> Option<Effect> {
        match self.edit.begin_save() {
            Ok(request) => {
                debug!(record_id = %request.record_id, "saving summary");
                Some(Effect::UpdateResumen(request))
            }
            Err(ValidationError::SaveInFlight) => {
                debug!("ignoring save while another save is in flight");
                None
            }
            Err(err) => {
                self.push_notice(Notice::validation(&err));
                None
            }
        }
    }

    /// Open the transcript reader for record `id`.
    ///
    /// Raises a notice and returns `None` when the record is unknown or has
    /// no transcript; the view does not change in that case.
    pub fn open_reader(&mut self, id: &str) -> Option<Effect> {
        let result = match self.records.iter().find(|record| record.id == id) {
            Some(record) => self.reader.open(record),
            None => Err(ValidationError::UnknownRecord {
                record_id: id.to_string(),
            }),
        };
        match result {
            Ok(request) => {
                debug!(record_id = %request.record_id, txt_id = %request.txt_id, "opening reader");
                Some(Effect::FetchTranscript(request))
            }
            Err(err) => {
                self.push_notice(Notice::validation(&err));
                None
            }
        }
    }

    /// Return to the list view.
    pub fn close_reader(&mut self) {
        self.reader.close();
    }

    /// Fold a gateway completion into the screen.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Listed(ticket, result) => {
                if ticket.0 == self.last_refresh {
                    self.loading = false;
                }
                match result {
                    Ok(records) => {
                        self.records = ingest(records);
                        self.edit.cancel();
                        info!(count = self.records.len(), "records loaded");
                    }
                    Err(err) => {
                        warn!(error = %err, detail = %err.detail(), "record list failed");
                        self.push_notice(Notice::list_failed(&err));
                    }
                }
            }
            Completion::Saved(request, result) => {
                if let Err(err) = &result {
                    warn!(
                        record_id = %request.record_id,
                        error = %err,
                        detail = %err.detail(),
                        "summary save failed"
                    );
                    self.push_notice(Notice::save_failed(err));
                }
                self.edit.finish_save(&request, &result, &mut self.records);
            }
            Completion::TranscriptFetched(request, result) => {
                if let Err(err) = &result {
                    warn!(txt_id = %request.txt_id, error = %err, "transcript fetch failed");
                }
                self.reader.finish(&request, result);
            }
        }
    }

    fn note_rejection(&mut self, result: Result<(), ValidationError>) -> Result<(), ValidationError> {
        if let Err(err) = &result {
            self.push_notice(Notice::validation(err));
        }
        result
    }

    fn push_notice(&mut self, notice: Notice) {
        debug!(kind = ?notice.kind, message = %notice.message, "notice raised");
        self.notices.push(notice);
    }
}
