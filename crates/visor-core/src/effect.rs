//! Gateway calls requested by the screen and their completions.
//!
//! # Design
//! - The screen never awaits; it hands out an [`Effect`] and later receives
//!   the matching [`Completion`].
//! - Callers decide how effects run (inline, or spawned on a runtime).

use crate::edit::SaveRequest;
use crate::error::GatewayResult;
use crate::gateway::RecordGateway;
use crate::model::Record;
use crate::reader::TranscriptRequest;

/// Sequence number of a list fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(pub u64);

/// A pending gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full record set.
    ListRecords(RefreshTicket),
    /// Write one summary.
    UpdateResumen(SaveRequest),
    /// Fetch one transcript.
    FetchTranscript(TranscriptRequest),
}

/// Result of a gateway call, tagged with the effect that produced it.
#[derive(Debug)]
pub enum Completion {
    /// List fetch finished.
    Listed(RefreshTicket, GatewayResult<Vec<Record>>),
    /// Summary write finished.
    Saved(SaveRequest, GatewayResult<()>),
    /// Transcript fetch finished.
    TranscriptFetched(TranscriptRequest, GatewayResult<String>),
}

/// Execute one effect against `gateway`.
pub async fn run_effect<G>(gateway: &G, effect: Effect) -> Completion
where
    G: RecordGateway + ?Sized,
{
    match effect {
        Effect::ListRecords(ticket) => Completion::Listed(ticket, gateway.list_records().await),
        Effect::UpdateResumen(request) => {
            let result = gateway
                .update_resumen(&request.record_id, &request.resumen)
                .await;
            Completion::Saved(request, result)
        }
        Effect::FetchTranscript(request) => {
            let result = gateway.fetch_transcript_text(&request.txt_id).await;
            Completion::TranscriptFetched(request, result)
        }
    }
}
