// ABOUTME: Time-of-day slot label ("HH:MM") used by appointments and the availability grid
// ABOUTME: Validated newtype with lexical ordering equal to chronological ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A zero-padded 24h time label such as `"07:00"` or `"19:30"`
///
/// Only the shape is validated; a slot does not have to sit on the daily grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(String);

impl SlotTime {
    /// Build a label from hour and minute components
    ///
    /// Returns `None` when either component is out of range.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self(format!("{hour:02}:{minute:02}")))
    }

    /// Borrow the label
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SlotTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid time '{s}', expected HH:MM");
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(slot: SlotTime) -> Self {
        slot.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_labels() {
        assert_eq!("07:00".parse::<SlotTime>().unwrap().as_str(), "07:00");
        assert_eq!("19:30".parse::<SlotTime>().unwrap().as_str(), "19:30");
        assert_eq!("23:59".parse::<SlotTime>().unwrap().as_str(), "23:59");
    }

    #[test]
    fn test_reject_malformed_labels() {
        for bad in ["7:00", "24:00", "10:60", "10h30", "", "10:3", "ab:cd", "+1:00"] {
            assert!(bad.parse::<SlotTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier = SlotTime::from_hm(9, 30).unwrap();
        let later = SlotTime::from_hm(10, 0).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_rejects_bad_shape() {
        let parsed: Result<SlotTime, _> = serde_json::from_str("\"25:00\"");
        assert!(parsed.is_err());
        let parsed: SlotTime = serde_json::from_str("\"10:00\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"10:00\"");
    }
}
