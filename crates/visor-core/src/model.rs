//! Record model and the derived display fields used by renderers.
//!
//! # Design
//! - Spreadsheet cells arrive loosely typed; every field decodes to an
//!   optional string so later stages never see a type mismatch. Structured
//!   cells (objects, arrays) read as absent.
//! - Derived values (`display_name`, timestamp parts, status) are recomputed
//!   on demand and never stored.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Sentinel date shown when a record has no timestamp.
pub const MISSING_DATE: &str = "S/F";

/// Marker that flags a summary for review.
pub const FLAG_MARKER: &str = "(GEM)";

/// One row of the remote source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Primary key; unique and immutable.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Optional contact display name.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub contacto: Option<String>,
    /// Free-text summary note.
    #[serde(default, deserialize_with = "lenient_string")]
    pub resumen: String,
    /// Raw timestamp as stored by the source.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha: Option<String>,
    /// Reference to the linked transcript document.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub txt_id: Option<String>,
}

impl Record {
    /// Construct a record with only its id set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Name shown for the record.
    #[must_use]
    pub fn display_name(&self) -> &str {
        resolve_display_name(self)
    }

    /// Date and time parts of the raw timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        format_timestamp(self.fecha.as_deref())
    }

    /// Whether the summary carries the review marker.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        is_flagged(Some(&self.resumen))
    }

    /// Transcript reference, if one is linked.
    #[must_use]
    pub fn transcript_id(&self) -> Option<&str> {
        self.txt_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Raw timestamp used as the sort key; absent sorts as empty.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.fecha.as_deref().unwrap_or("")
    }
}

/// Date and time parts of a raw timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Date with `-` normalised to `/`, or [`MISSING_DATE`].
    pub date: String,
    /// Time with `.` normalised to `:`, empty when absent.
    pub time: String,
}

/// Split a raw timestamp into display parts.
///
/// Total: malformed input degrades to whatever tokens are present.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> Timestamp {
    let mut tokens = raw.unwrap_or("").split_whitespace();
    let Some(date) = tokens.next() else {
        return Timestamp {
            date: MISSING_DATE.to_string(),
            time: String::new(),
        };
    };
    Timestamp {
        date: date.replace('-', "/"),
        time: tokens.next().unwrap_or("").replace('.', ":"),
    }
}

/// `contacto` when non-empty, else the id.
#[must_use]
pub fn resolve_display_name(record: &Record) -> &str {
    match record.contacto.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => &record.id,
    }
}

/// True when the trimmed summary starts with [`FLAG_MARKER`].
#[must_use]
pub fn is_flagged(resumen: Option<&str>) -> bool {
    resumen.is_some_and(|text| text.trim().starts_with(FLAG_MARKER))
}

/// Review status derived from the flag marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Summary carries the review marker.
    Review,
    /// Nothing pending.
    Ok,
}

impl Status {
    /// Short badge label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Review => "REV",
            Self::Ok => "OK",
        }
    }
}

/// Render-ready projection of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordView {
    /// Underlying record.
    pub record: Record,
    /// Resolved display name.
    pub display_name: String,
    /// Parsed timestamp parts.
    pub timestamp: Timestamp,
    /// Flag classification.
    pub status: Status,
}

impl From<&Record> for RecordView {
    fn from(record: &Record) -> Self {
        Self {
            display_name: record.display_name().to_string(),
            timestamp: record.timestamp(),
            status: if record.is_flagged() {
                Status::Review
            } else {
                Status::Ok
            },
            record: record.clone(),
        }
    }
}

impl RecordView {
    /// Whether the record is flagged for review.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.status == Status::Review
    }
}

/// Decode a loosely typed cell as a string; null and structured values
/// read as empty.
///
/// # Errors
///
/// Only when the underlying input is malformed.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// Decode a loosely typed cell as an optional string. Scalars keep their
/// text form; null, objects and arrays read as `None`.
///
/// # Errors
///
/// Only when the underlying input is malformed.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientString)
}

struct LenientString;

impl<'de> Visitor<'de> for LenientString {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_timestamp_handles_missing_value() {
        let parts = format_timestamp(None);
        assert_eq!(parts.date, "S/F");
        assert_eq!(parts.time, "");
        assert_eq!(format_timestamp(Some("   ")).date, "S/F");
    }

    #[test]
    fn format_timestamp_normalises_date_and_time() {
        let parts = format_timestamp(Some("2024-05-01 14.30"));
        assert_eq!(parts.date, "2024/05/01");
        assert_eq!(parts.time, "14:30");
    }

    #[test]
    fn format_timestamp_without_time() {
        let parts = format_timestamp(Some("2024-05-01"));
        assert_eq!(parts.date, "2024/05/01");
        assert_eq!(parts.time, "");
    }

    #[test]
    fn format_timestamp_collapses_whitespace_runs() {
        let parts = format_timestamp(Some(" 2024-05-01   09.05.33 "));
        assert_eq!(parts.date, "2024/05/01");
        assert_eq!(parts.time, "09:05:33");
    }

    #[test]
    fn flag_detection_trims_leading_whitespace() {
        assert!(is_flagged(Some("(GEM) needs review")));
        assert!(is_flagged(Some("  (GEM) x")));
        assert!(!is_flagged(Some("normal note")));
        assert!(!is_flagged(Some("note (GEM)")));
        assert!(!is_flagged(None));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut record = Record::new("call-7");
        assert_eq!(record.display_name(), "call-7");
        record.contacto = Some(String::new());
        assert_eq!(record.display_name(), "call-7");
        record.contacto = Some("Ana".to_string());
        assert_eq!(record.display_name(), "Ana");
    }

    #[test]
    fn decodes_loosely_typed_cells() {
        let record: Record = serde_json::from_str(
            r#"{"id": 42, "contacto": null, "resumen": null, "fecha": "2024-01-02 10.00", "txt_id": ""}"#,
        )
        .expect("record should decode");
        assert_eq!(record.id, "42");
        assert_eq!(record.contacto, None);
        assert_eq!(record.resumen, "");
        assert_eq!(record.fecha.as_deref(), Some("2024-01-02 10.00"));
        assert_eq!(record.transcript_id(), None);
    }

    #[test]
    fn structured_cells_read_as_empty() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[
                {"id": "A", "resumen": "plain"},
                {"id": "B", "resumen": {"rich": "text", "runs": [1, 2]}, "contacto": ["Ana", "Luis"]},
                {"id": "C", "fecha": [], "txt_id": {}}
            ]"#,
        )
        .expect("listing should decode");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].resumen, "plain");
        assert_eq!(records[1].resumen, "");
        assert_eq!(records[1].contacto, None);
        assert_eq!(records[2].fecha, None);
        assert_eq!(records[2].transcript_id(), None);
    }

    #[test]
    fn missing_fields_default() {
        let record: Record = serde_json::from_str(r#"{"id": "A"}"#).expect("record should decode");
        assert_eq!(record, Record::new("A"));
        assert_eq!(record.sort_key(), "");
    }

    #[test]
    fn view_projects_status() {
        let record = Record {
            resumen: "(GEM) check".to_string(),
            ..Record::new("A")
        };
        let view = RecordView::from(&record);
        assert_eq!(view.status, Status::Review);
        assert_eq!(view.status.label(), "REV");
        assert!(view.is_flagged());
    }
}
