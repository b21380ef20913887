//! Edit mode and the confirm-then-apply save protocol.
//!
//! # Design
//! - At most one record is in edit mode; starting another edit discards the
//!   previous draft without confirmation.
//! - The held collection is only touched after the gateway confirms a write.
//! - At most one save is in flight.

use tracing::{debug, info};

use crate::error::{GatewayResult, ValidationError};
use crate::model::Record;

/// Unsaved summary text for the record in edit mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    /// Record being edited.
    pub record_id: String,
    /// Current draft text, kept verbatim.
    pub text: String,
}

/// Gateway write issued by [`EditController::begin_save`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    /// Target record.
    pub record_id: String,
    /// Summary to write.
    pub resumen: String,
}

/// Outcome of applying a save completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The write was confirmed and applied locally.
    Applied,
    /// The write failed; local state is unchanged.
    Failed,
}

/// Edit/save state for the list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditController {
    draft: Option<Draft>,
    saving: bool,
}

impl EditController {
    /// Id of the record in edit mode.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.draft.as_ref().map(|draft| draft.record_id.as_str())
    }

    /// Current draft, if editing.
    #[must_use]
    pub const fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Whether a save is in flight.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// Put `record` in edit mode with its current summary as the draft.
    ///
    /// # Errors
    /// Returns [`ValidationError::SaveInFlight`] while a save is pending.
    pub fn begin(&mut self, record: &Record) -> Result<(), ValidationError> {
        if self.saving {
            return Err(ValidationError::SaveInFlight);
        }
        if let Some(previous) = self.draft.as_ref()
            && previous.record_id != record.id
        {
            debug!(
                record_id = %previous.record_id,
                "discarding unsaved draft for previous record"
            );
        }
        self.draft = Some(Draft {
            record_id: record.id.clone(),
            text: record.resumen.clone(),
        });
        Ok(())
    }

    /// Replace the draft text.
    ///
    /// # Errors
    /// Returns [`ValidationError::NotEditing`] when no record is in edit mode.
    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        let draft = self.draft.as_mut().ok_or(ValidationError::NotEditing)?;
        draft.text = text.into();
        Ok(())
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Start a save of the current draft.
    ///
    /// # Errors
    /// Returns [`ValidationError::NotEditing`] with no draft, or
    /// [`ValidationError::SaveInFlight`] when a save is already pending.
    pub fn begin_save(&mut self) -> Result<SaveRequest, ValidationError> {
        if self.saving {
            return Err(ValidationError::SaveInFlight);
        }
        let draft = self.draft.as_ref().ok_or(ValidationError::NotEditing)?;
        self.saving = true;
        Ok(SaveRequest {
            record_id: draft.record_id.clone(),
            resumen: draft.text.clone(),
        })
    }

    /// Apply the gateway result of `request`.
    ///
    /// On success the summary is written into the matching record and edit
    /// mode closes. On failure the draft and the collection stay as they are.
    pub fn finish_save(
        &mut self,
        request: &SaveRequest,
        result: &GatewayResult<()>,
        records: &mut [Record],
    ) -> SaveOutcome {
        self.saving = false;
        if result.is_err() {
            return SaveOutcome::Failed;
        }
        if let Some(record) = records
            .iter_mut()
            .find(|record| record.id == request.record_id)
        {
            record.resumen.clone_from(&request.resumen);
        }
        if self.editing_id() == Some(request.record_id.as_str()) {
            self.draft = None;
        }
        info!(record_id = %request.record_id, "summary saved");
        SaveOutcome::Applied
    }
}
