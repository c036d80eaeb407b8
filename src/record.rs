// src/record.rs

use crate::{error::Result, timestamp};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Full staged header: the seven raw snapshot fields, then `extracted_at`.
/// Writer and reader both go through this.
pub const STAGED_COLUMNS: [&str; 8] = [
    "date",
    "title",
    "explanation",
    "media_type",
    "url",
    "hdurl",
    "service_version",
    "extracted_at",
];

/// One APOD entry as delivered by the upstream fetcher. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub hdurl: Option<String>,
    pub service_version: Option<String>,
}

impl RawRecord {
    /// Project a JSON object onto the known fields.
    ///
    /// Missing keys and `null` become `None`; strings are copied verbatim and any
    /// other JSON value is kept as its JSON text.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| match value.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        RawRecord {
            date: field("date"),
            title: field("title"),
            explanation: field("explanation"),
            media_type: field("media_type"),
            url: field("url"),
            hdurl: field("hdurl"),
            service_version: field("service_version"),
        }
    }
}

/// A raw record plus the moment it was extracted. Serializes in `STAGED_COLUMNS` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedRow {
    pub date: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub hdurl: Option<String>,
    pub service_version: Option<String>,
    #[serde(serialize_with = "serialize_extracted_at")]
    pub extracted_at: NaiveDateTime,
}

impl StagedRow {
    pub fn new(raw: RawRecord, extracted_at: NaiveDateTime) -> Self {
        StagedRow {
            date: raw.date,
            title: raw.title,
            explanation: raw.explanation,
            media_type: raw.media_type,
            url: raw.url,
            hdurl: raw.hdurl,
            service_version: raw.service_version,
            extracted_at,
        }
    }
}

fn serialize_extracted_at<S: Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp::format_staged(ts))
}

/// A row read back from the staged artifact, cells in `STAGED_COLUMNS` order.
/// Empty cells are `None` and become SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRow {
    pub cells: Vec<Option<String>>,
}

impl LoadRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        STAGED_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|idx| self.cells.get(idx))
            .and_then(|cell| cell.as_deref())
    }

    /// Rewrite `extracted_at` to the canonical second-precision form.
    pub fn normalize_extracted_at(&mut self) -> Result<()> {
        let idx = STAGED_COLUMNS.len() - 1;
        if let Some(Some(raw)) = self.cells.get(idx) {
            let normalized = timestamp::normalize_extracted_at(raw)?;
            self.cells[idx] = Some(normalized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_are_none() {
        let raw = RawRecord::from_value(&json!({
            "date": "2024-05-01",
            "title": "Test",
            "hdurl": null
        }));
        assert_eq!(raw.date.as_deref(), Some("2024-05-01"));
        assert_eq!(raw.title.as_deref(), Some("Test"));
        assert_eq!(raw.hdurl, None);
        assert_eq!(raw.service_version, None);
        assert_eq!(raw.explanation, None);
    }

    #[test]
    fn strings_are_verbatim_and_other_values_keep_json_text() {
        let raw = RawRecord::from_value(&json!({
            "title": "  spaced  ",
            "service_version": 1,
            "media_type": true
        }));
        assert_eq!(raw.title.as_deref(), Some("  spaced  "));
        assert_eq!(raw.service_version.as_deref(), Some("1"));
        assert_eq!(raw.media_type.as_deref(), Some("true"));
    }

    #[test]
    fn staged_row_fields_match_staged_columns() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let value = serde_json::to_value(StagedRow::new(RawRecord::default(), ts)).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = STAGED_COLUMNS.to_vec();
        expected.sort_unstable();
        keys.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn load_row_lookup_by_column() {
        let mut cells = vec![None; STAGED_COLUMNS.len()];
        cells[1] = Some("Title".to_string());
        cells[7] = Some("2024-05-01 10:00:00.5".to_string());
        let mut row = LoadRow { cells };
        assert_eq!(row.get("title"), Some("Title"));
        assert_eq!(row.get("hdurl"), None);
        assert_eq!(row.get("nope"), None);

        row.normalize_extracted_at().unwrap();
        assert_eq!(row.get("extracted_at"), Some("2024-05-01T10:00:00"));
    }
}
