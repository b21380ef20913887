//! Typed interface over the remote record source.
//!
//! # Design
//! - One round trip per call; no retries here, retry policy belongs to callers.
//! - Implementations propagate [`GatewayError`] unmodified.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::model::Record;

/// Remote source of records and transcripts.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Fetch the full current record set.
    async fn list_records(&self) -> GatewayResult<Vec<Record>>;

    /// Write the summary of one record; succeeds only on explicit confirmation.
    async fn update_resumen(&self, id: &str, resumen: &str) -> GatewayResult<()>;

    /// Fetch the full text of a linked transcript document.
    async fn fetch_transcript_text(&self, txt_id: &str) -> GatewayResult<String>;
}

#[async_trait]
impl<T> RecordGateway for &T
where
    T: RecordGateway + ?Sized,
{
    async fn list_records(&self) -> GatewayResult<Vec<Record>> {
        (**self).list_records().await
    }

    async fn update_resumen(&self, id: &str, resumen: &str) -> GatewayResult<()> {
        (**self).update_resumen(id, resumen).await
    }

    async fn fetch_transcript_text(&self, txt_id: &str) -> GatewayResult<String> {
        (**self).fetch_transcript_text(txt_id).await
    }
}

#[async_trait]
impl<T> RecordGateway for Arc<T>
where
    T: RecordGateway + ?Sized,
{
    async fn list_records(&self) -> GatewayResult<Vec<Record>> {
        (**self).list_records().await
    }

    async fn update_resumen(&self, id: &str, resumen: &str) -> GatewayResult<()> {
        (**self).update_resumen(id, resumen).await
    }

    async fn fetch_transcript_text(&self, txt_id: &str) -> GatewayResult<String> {
        (**self).fetch_transcript_text(txt_id).await
    }
}
