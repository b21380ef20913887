//! Search, ordering, and ingestion of the held record collection.
//!
//! # Design
//! - Matching is a case-insensitive substring test over `id`, `contacto`
//!   and `resumen`; an empty term is the identity.
//! - Results preserve the input order.
//! - Ordering is applied at list time only.

use std::collections::HashSet;

use tracing::warn;

use crate::model::Record;

/// Records matching `term`, in their original order.
#[must_use]
pub fn filter<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

/// Whether `record` matches `term` under [`filter`] semantics.
#[must_use]
pub fn record_matches(record: &Record, term: &str) -> bool {
    term.is_empty() || matches(record, &term.to_lowercase())
}

fn matches(record: &Record, needle: &str) -> bool {
    [
        record.id.as_str(),
        record.contacto.as_deref().unwrap_or(""),
        record.resumen.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Order by raw `fecha`, most recent first; stable for equal keys.
pub fn sort_by_fecha_desc(records: &mut [Record]) {
    records.sort_by(|left, right| right.sort_key().cmp(left.sort_key()));
}

/// Normalise a freshly listed collection: drop rows without an id, keep the
/// first occurrence of each id, then sort.
#[must_use]
pub fn ingest(records: Vec<Record>) -> Vec<Record> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let mut kept: Vec<Record> = records
        .into_iter()
        .filter(|record| !record.id.trim().is_empty())
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    if kept.len() != total {
        warn!(
            listed = total,
            kept = kept.len(),
            "dropped rows with empty or duplicate ids"
        );
    }
    sort_by_fecha_desc(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, contacto: Option<&str>, resumen: &str, fecha: Option<&str>) -> Record {
        Record {
            id: id.to_string(),
            contacto: contacto.map(str::to_string),
            resumen: resumen.to_string(),
            fecha: fecha.map(str::to_string),
            txt_id: None,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("A-1", Some("Marta Ruiz"), "(GEM) call back", Some("2024-01-02")),
            record("B-2", None, "Pricing question", Some("2024-01-01")),
            record("C-3", Some("Luis"), "", None),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    #[test]
    fn empty_term_is_identity() {
        let records = sample();
        let result = filter(&records, "");
        assert_eq!(ids(&result), vec!["A-1", "B-2", "C-3"]);
    }

    #[test]
    fn matches_each_field_case_insensitively() {
        let records = sample();
        assert_eq!(ids(&filter(&records, "marta")), vec!["A-1"]);
        assert_eq!(ids(&filter(&records, "b-2")), vec!["B-2"]);
        assert_eq!(ids(&filter(&records, "PRICING")), vec!["B-2"]);
        assert!(filter(&records, "nobody").is_empty());
    }

    #[test]
    fn partitions_records_by_match() {
        let records = sample();
        let cases: [(&str, &[&str]); 7] = [
            ("a", &["A-1"]),
            ("l", &["A-1", "C-3"]),
            ("(gem)", &["A-1"]),
            ("-", &["A-1", "B-2", "C-3"]),
            ("zz", &[]),
            ("Ruiz", &["A-1"]),
            ("LUIS", &["C-3"]),
        ];
        for (term, expected) in cases {
            let needle = term.to_lowercase();
            let result = filter(&records, term);
            assert_eq!(ids(&result), expected, "term {term:?}");
            for record in &records {
                let contains = record.id.to_lowercase().contains(&needle)
                    || record
                        .contacto
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                    || record.resumen.to_lowercase().contains(&needle);
                let included = result.iter().any(|hit| hit.id == record.id);
                assert_eq!(included, contains, "term {term:?}, record {}", record.id);
                assert_eq!(record_matches(record, term), contains, "term {term:?}");
            }
        }
    }

    #[test]
    fn result_preserves_input_order() {
        let records = sample();
        assert_eq!(ids(&filter(&records, "r")), vec!["A-1", "B-2"]);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut records = vec![
            record("old", None, "", Some("2023-12-31")),
            record("tie-1", None, "", Some("2024-01-01")),
            record("none", None, "", None),
            record("tie-2", None, "", Some("2024-01-01")),
            record("new", None, "", Some("2024-02-01 08.00")),
        ];
        sort_by_fecha_desc(&mut records);
        let order: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(order, vec!["new", "tie-1", "tie-2", "old", "none"]);
    }

    #[test]
    fn ingest_drops_blank_and_duplicate_ids() {
        let records = vec![
            record("A", None, "first", Some("2024-01-01")),
            record("", None, "blank", Some("2024-03-01")),
            record("A", None, "second", Some("2024-02-01")),
            record("B", None, "", Some("2024-01-05")),
        ];
        let kept = ingest(records);
        let order: Vec<&str> = kept.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
        assert_eq!(kept[1].resumen, "first");
    }
}
