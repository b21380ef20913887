//! In-memory gateway with scriptable failures.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use visor_core::{GatewayError, GatewayResult, Record, RecordGateway};

/// Failure to inject into the next matching call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Transport failure with the given cause.
    Network(String),
    /// `success: false` with the given message and debug id.
    Api {
        /// Server message.
        message: String,
        /// Optional debug identifier.
        debug_id: Option<String>,
    },
}

impl Failure {
    fn into_error(self, operation: &'static str) -> GatewayError {
        match self {
            Self::Network(cause) => GatewayError::network(operation, io::Error::other(cause)),
            Self::Api { message, debug_id } => {
                GatewayError::api(operation, Some(message), debug_id)
            }
        }
    }
}

/// Call observed by [`ScriptedGateway`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    /// `list_records`.
    List,
    /// `update_resumen(id, resumen)`.
    Update(String, String),
    /// `fetch_transcript_text(txt_id)`.
    FetchText(String),
}

#[derive(Default)]
struct State {
    records: Vec<Record>,
    transcripts: HashMap<String, String>,
    list_failures: VecDeque<Failure>,
    update_failures: VecDeque<Failure>,
    text_failures: VecDeque<Failure>,
    calls: Vec<Call>,
}

/// Gateway backed by an in-memory table that behaves like the endpoint:
/// updates for unknown ids fail with the id echoed as debug id.
#[derive(Default)]
pub struct ScriptedGateway {
    state: Mutex<State>,
}

impl ScriptedGateway {
    /// Gateway serving `records`.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            state: Mutex::new(State {
                records,
                ..State::default()
            }),
        }
    }

    /// Serve `text` for transcript `txt_id`.
    #[must_use]
    pub fn with_transcript(self, txt_id: &str, text: &str) -> Self {
        self.lock()
            .transcripts
            .insert(txt_id.to_string(), text.to_string());
        self
    }

    /// Fail the next `list_records` call.
    pub fn fail_next_list(&self, failure: Failure) {
        self.lock().list_failures.push_back(failure);
    }

    /// Fail the next `update_resumen` call.
    pub fn fail_next_update(&self, failure: Failure) {
        self.lock().update_failures.push_back(failure);
    }

    /// Fail the next `fetch_transcript_text` call.
    pub fn fail_next_text(&self, failure: Failure) {
        self.lock().text_failures.push_back(failure);
    }

    /// Replace the served records.
    pub fn set_records(&self, records: Vec<Record>) {
        self.lock().records = records;
    }

    /// Records as currently stored remotely.
    #[must_use]
    pub fn stored(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    /// Calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordGateway for ScriptedGateway {
    async fn list_records(&self) -> GatewayResult<Vec<Record>> {
        let mut state = self.lock();
        state.calls.push(Call::List);
        if let Some(failure) = state.list_failures.pop_front() {
            return Err(failure.into_error("read"));
        }
        Ok(state.records.clone())
    }

    async fn update_resumen(&self, id: &str, resumen: &str) -> GatewayResult<()> {
        let mut state = self.lock();
        state
            .calls
            .push(Call::Update(id.to_string(), resumen.to_string()));
        if let Some(failure) = state.update_failures.pop_front() {
            return Err(failure.into_error("update"));
        }
        match state.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.resumen = resumen.to_string();
                Ok(())
            }
            None => Err(GatewayError::api(
                "update",
                Some("id not found".to_string()),
                Some(id.to_string()),
            )),
        }
    }

    async fn fetch_transcript_text(&self, txt_id: &str) -> GatewayResult<String> {
        let mut state = self.lock();
        state.calls.push(Call::FetchText(txt_id.to_string()));
        if let Some(failure) = state.text_failures.pop_front() {
            return Err(failure.into_error("getText"));
        }
        state.transcripts.get(txt_id).cloned().ok_or_else(|| {
            GatewayError::api("getText", Some("document not found".to_string()), None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record;

    #[tokio::test]
    async fn update_of_unknown_id_echoes_debug_id() {
        let gateway = ScriptedGateway::new(vec![record("A", None, "")]);
        let err = gateway
            .update_resumen("Z", "x")
            .await
            .expect_err("unknown id should fail");
        match err {
            GatewayError::Api { debug_id, .. } => assert_eq!(debug_id.as_deref(), Some("Z")),
            GatewayError::Network { .. } => panic!("expected api error"),
        }
    }

    #[tokio::test]
    async fn scripted_failures_are_consumed_once() {
        let gateway = ScriptedGateway::new(Vec::new());
        gateway.fail_next_list(Failure::Network("offline".to_string()));
        assert!(gateway.list_records().await.is_err());
        assert!(gateway.list_records().await.is_ok());
        assert_eq!(gateway.calls(), vec![Call::List, Call::List]);
    }
}
