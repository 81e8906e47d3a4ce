//! Textual date formats shared with the existing clients.
//!
//! Most tables exchange dates in the ISO-like `YYYY-MM-DD` form. Medicine
//! expiry instead round-trips through the two-digit-year `DD-MON-YY` form
//! the previous backend wrote, so stored values must keep parsing back from
//! exactly that shape.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("unrecognized date `{0}`, expected YYYY-MM-DD")]
    Iso(String),

    #[error("unrecognized date `{0}`, expected DD-MON-YY")]
    Legacy(String),
}

/// Parses the `YYYY-MM-DD` wire form. Full RFC 3339 timestamps are
/// tolerated; only the date part is kept.
pub fn parse_iso(input: &str) -> Result<NaiveDate, DateFormatError> {
    let date_part = input.split('T').next().unwrap_or(input);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| DateFormatError::Iso(input.to_string()))
}

/// Formats a date into the legacy expiry form, e.g. `29-NOV-24`.
pub fn format_legacy(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string().to_uppercase()
}

/// Parses the legacy `DD-MON-YY` expiry form. Month names match
/// case-insensitively.
pub fn parse_legacy(input: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(input, "%d-%b-%y")
        .map_err(|_| DateFormatError::Legacy(input.to_string()))
}

/// Converts an incoming expiry value into the date that gets stored.
///
/// Accepts the ISO wire form or the legacy form itself. Either way the value
/// passes through `DD-MON-YY`, so what lands in the database is exactly what
/// parses back from the legacy representation (two-digit years and all).
pub fn parse_expiry(input: &str) -> Result<NaiveDate, DateFormatError> {
    let date = parse_iso(input).or_else(|_| parse_legacy(input))?;
    parse_legacy(&format_legacy(date))
}

/// Serde adapter for optional dates carried in the legacy expiry form.
pub mod legacy {
    use chrono::NaiveDate;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&super::format_legacy(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| super::parse_legacy(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_round_trip() {
        assert_eq!(parse_iso("2024-11-29").unwrap(), date(2024, 11, 29));
    }

    #[test]
    fn iso_accepts_timestamps() {
        assert_eq!(
            parse_iso("2024-11-29T00:00:00.000Z").unwrap(),
            date(2024, 11, 29)
        );
    }

    #[test]
    fn iso_rejects_garbage() {
        assert_eq!(
            parse_iso("soon"),
            Err(DateFormatError::Iso("soon".to_string()))
        );
    }

    #[test]
    fn legacy_format_is_uppercase() {
        assert_eq!(format_legacy(date(2024, 11, 29)), "29-NOV-24");
        assert_eq!(format_legacy(date(2025, 1, 3)), "03-JAN-25");
    }

    #[test]
    fn legacy_parse_ignores_case() {
        assert_eq!(parse_legacy("29-NOV-24").unwrap(), date(2024, 11, 29));
        assert_eq!(parse_legacy("29-Nov-24").unwrap(), date(2024, 11, 29));
    }

    #[test]
    fn expiry_round_trips_through_legacy_form() {
        let stored = parse_expiry("2024-11-29").unwrap();
        assert_eq!(stored, date(2024, 11, 29));
        assert_eq!(parse_legacy(&format_legacy(stored)).unwrap(), stored);
    }

    #[test]
    fn expiry_accepts_the_legacy_form_itself() {
        assert_eq!(parse_expiry("29-NOV-24").unwrap(), date(2024, 11, 29));
    }
}
