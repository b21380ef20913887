#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, unreachable_pub)]
//! Wire DTOs for the spreadsheet endpoint.
//!
//! Every action answers with a `success` flag plus action-specific fields.
//! Envelopes decode leniently: a missing `success` reads as failure, a null
//! `data` reads as empty, text fields accept any scalar, and unknown fields
//! are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use visor_core::{Record, lenient_opt_string};

/// Query value selecting the list action.
pub const ACTION_READ: &str = "read";
/// Body value selecting the update action.
pub const ACTION_UPDATE: &str = "update";
/// Query value selecting the transcript action.
pub const ACTION_GET_TEXT: &str = "getText";

/// Response to `GET ?action=read`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadResponse {
    /// Whether the server completed the action.
    #[serde(default)]
    pub success: bool,
    /// Full record set.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Record>,
    /// Failure description when `success` is false.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

/// Body of the update `POST`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRequest<'a> {
    /// Always [`ACTION_UPDATE`].
    pub action: &'a str,
    /// Target record id.
    pub id: &'a str,
    /// New summary text.
    pub resumen: &'a str,
}

impl<'a> UpdateRequest<'a> {
    /// Update body for one record.
    #[must_use]
    pub const fn new(id: &'a str, resumen: &'a str) -> Self {
        Self {
            action: ACTION_UPDATE,
            id,
            resumen,
        }
    }
}

/// Response to the update `POST`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateResponse {
    /// Whether the write was applied.
    #[serde(default)]
    pub success: bool,
    /// Failure description.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    /// Identifier the server tried to match, for diagnosis.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub debug_id_buscado: Option<String>,
}

/// Response to `GET ?action=getText&id=<txt_id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextResponse {
    /// Whether the document was read.
    #[serde(default)]
    pub success: bool,
    /// Transcript text.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    /// Failure description.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_serialises_action_first() {
        let body = serde_json::to_string(&UpdateRequest::new("A", "nota"))
            .expect("request should serialise");
        assert_eq!(body, r#"{"action":"update","id":"A","resumen":"nota"}"#);
    }

    #[test]
    fn read_response_decodes_spreadsheet_rows() {
        let response: ReadResponse = serde_json::from_value(json!({
            "success": true,
            "data": [
                {"id": "A", "contacto": "Ana", "resumen": "(GEM) x", "fecha": "2024-01-02 10.00", "txt_id": "doc"},
                {"id": 7, "resumen": null}
            ]
        }))
        .expect("response should decode");
        assert!(response.success);
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].id, "7");
        assert_eq!(response.data[1].resumen, "");
    }

    #[test]
    fn failure_envelopes_carry_message_and_debug_id() {
        let response: UpdateResponse = serde_json::from_value(json!({
            "success": false,
            "message": "ID no encontrado",
            "debug_id_buscado": "A-1"
        }))
        .expect("response should decode");
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("ID no encontrado"));
        assert_eq!(response.debug_id_buscado.as_deref(), Some("A-1"));
    }

    #[test]
    fn structured_cell_does_not_sink_the_listing() {
        let response: ReadResponse = serde_json::from_value(json!({
            "success": true,
            "data": [{"id": "A"}, {"id": "B", "resumen": {"rich": "text"}}]
        }))
        .expect("response should decode");
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].id, "B");
        assert_eq!(response.data[1].resumen, "");
    }

    #[test]
    fn failure_envelope_tolerates_null_data() {
        let response: ReadResponse = serde_json::from_value(json!({
            "success": false,
            "message": "sheet missing",
            "data": null
        }))
        .expect("response should decode");
        assert!(!response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.message.as_deref(), Some("sheet missing"));
    }

    #[test]
    fn scalar_envelope_fields_read_as_text() {
        let response: UpdateResponse = serde_json::from_value(json!({
            "success": false,
            "message": 404,
            "debug_id_buscado": 42
        }))
        .expect("response should decode");
        assert_eq!(response.message.as_deref(), Some("404"));
        assert_eq!(response.debug_id_buscado.as_deref(), Some("42"));

        let response: TextResponse =
            serde_json::from_value(json!({"success": true, "text": null}))
                .expect("response should decode");
        assert_eq!(response.text, None);
    }

    #[test]
    fn missing_success_flag_reads_as_failure() {
        let response: TextResponse =
            serde_json::from_value(json!({"text": "hola"})).expect("response should decode");
        assert!(!response.success);
    }
}
