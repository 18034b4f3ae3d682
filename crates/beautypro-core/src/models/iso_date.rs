// ABOUTME: Serde helpers for calendar dates written as zero-padded YYYY-MM-DD
// ABOUTME: Used on request bodies and query strings so unpadded dates are rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! Strict `YYYY-MM-DD` date fields
//!
//! chrono's own `NaiveDate` deserializer normalizes unpadded input such as
//! `2025-3-15`. Fields tagged with these helpers accept only the ten-character
//! zero-padded form, which is also the form dates are stored and echoed in.
//!
//! ```ignore
//! #[serde(deserialize_with = "crate::models::iso_date::deserialize")]
//! pub date: NaiveDate,
//! ```

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

/// chrono format string for the accepted shape
pub const FORMAT: &str = "%Y-%m-%d";

/// Parse a zero-padded `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns a message naming the input when it is not exactly ten characters
/// of `dddd-dd-dd` or does not name a real calendar day
pub fn parse(s: &str) -> Result<NaiveDate, String> {
    let invalid = || format!("Invalid date '{s}', expected YYYY-MM-DD");
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, FORMAT).map_err(|_| invalid())
}

/// Deserialize a required date
///
/// # Errors
///
/// Fails on anything [`parse`] rejects
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

/// Helpers for `Option<NaiveDate>` fields; pair with `#[serde(default)]`
pub mod option {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    /// Deserialize an optional date
    ///
    /// # Errors
    ///
    /// Fails when a value is present and [`super::parse`] rejects it
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse(&raw))
            .transpose()
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(deserialize_with = "super::deserialize")]
        date: NaiveDate,
        #[serde(default, deserialize_with = "super::option::deserialize")]
        until: Option<NaiveDate>,
    }

    #[test]
    fn test_accepts_padded_dates() {
        assert_eq!(parse("2025-03-15").ok(), NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(parse("2024-02-29").ok(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_rejects_loose_or_impossible_dates() {
        for raw in [
            "2025-3-15",
            "2025-03-5",
            "25-03-15",
            "2025/03/15",
            "2025-03-15T10:00",
            "2025-02-30",
            "+2025-03-15",
            "",
        ] {
            assert!(parse(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_field_helpers() {
        let body: Body = serde_json::from_str(r#"{"date":"2025-03-15"}"#).unwrap();
        assert_eq!(body.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(body.until, None);

        let body: Body =
            serde_json::from_str(r#"{"date":"2025-03-15","until":"2025-03-31"}"#).unwrap();
        assert_eq!(body.until, NaiveDate::from_ymd_opt(2025, 3, 31));

        let err = serde_json::from_str::<Body>(r#"{"date":"2025-3-15"}"#).unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
        let loose_until = r#"{"date":"2025-03-15","until":"2025-3-31"}"#;
        assert!(serde_json::from_str::<Body>(loose_until).is_err());
    }
}
