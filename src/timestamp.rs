use crate::error::{EtlError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// How the transform stage writes `extracted_at`: full microsecond precision.
pub const STAGED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// What the load stage sends to the remote table.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format_staged(ts: &NaiveDateTime) -> String {
    ts.format(STAGED_FORMAT).to_string()
}

/// Parse any of the accepted `extracted_at` layouts into a naive wall-clock time.
///
/// Accepted: `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`, RFC 3339 with an
/// offset (the offset is dropped, local wall time kept) and a bare `YYYY-MM-DD`.
pub fn parse_extracted_at(raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();
    // `%.f` also matches when there is no fractional part
    let first_err = match NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        Ok(ts) => return Ok(ts),
        Err(e) => e,
    };
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.naive_local());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight);
    }
    Err(EtlError::Timestamp {
        value: raw.to_string(),
        source: first_err,
    })
}

/// Reparse and render as `YYYY-MM-DDTHH:MM:SS`. Idempotent on its own output.
pub fn normalize_extracted_at(raw: &str) -> Result<String> {
    parse_extracted_at(raw).map(|ts| ts.format(CANONICAL_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_staged_and_iso_layouts() {
        for raw in [
            "2024-05-01 13:45:09.123456",
            "2024-05-01 13:45:09",
            "2024-05-01T13:45:09.987",
            "2024-05-01T13:45:09",
            "2024-05-01T13:45:09+02:00",
        ] {
            assert_eq!(normalize_extracted_at(raw).unwrap(), "2024-05-01T13:45:09", "{raw}");
        }
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(normalize_extracted_at("2024-05-01").unwrap(), "2024-05-01T00:00:00");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_extracted_at("2023-12-31 23:59:59.999999").unwrap();
        assert_eq!(normalize_extracted_at(&once).unwrap(), once);
    }

    #[test]
    fn garbage_is_a_timestamp_error() {
        let err = normalize_extracted_at("yesterday-ish").unwrap_err();
        match err {
            EtlError::Timestamp { value, .. } => assert_eq!(value, "yesterday-ish"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn staged_format_round_trips_through_the_parser() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(8, 0, 1, 42)
            .unwrap();
        let written = format_staged(&ts);
        assert_eq!(written, "2024-05-01 08:00:01.000042");
        assert_eq!(parse_extracted_at(&written).unwrap(), ts);
    }
}
