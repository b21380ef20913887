//! Record fixtures.

use serde_json::{Value, json};
use visor_core::Record;

/// Build a record from its id, raw timestamp, and summary.
#[must_use]
pub fn record(id: &str, fecha: Option<&str>, resumen: &str) -> Record {
    Record {
        id: id.to_string(),
        contacto: None,
        resumen: resumen.to_string(),
        fecha: fecha.map(str::to_string),
        txt_id: None,
    }
}

/// Attach a contact name.
#[must_use]
pub fn with_contact(mut record: Record, contacto: &str) -> Record {
    record.contacto = Some(contacto.to_string());
    record
}

/// Attach a transcript reference.
#[must_use]
pub fn with_transcript(mut record: Record, txt_id: &str) -> Record {
    record.txt_id = Some(txt_id.to_string());
    record
}

/// The two-record listing used by end-to-end checks: `A` is newer and
/// flagged, `B` is older with an empty summary.
#[must_use]
pub fn sample_listing() -> Vec<Record> {
    vec![
        record("B", Some("2024-01-01"), ""),
        record("A", Some("2024-01-02 10.00"), "(GEM) check"),
    ]
}

/// Successful `read` envelope as the endpoint sends it.
#[must_use]
pub fn read_envelope(records: &[Record]) -> Value {
    json!({ "success": true, "data": records })
}
