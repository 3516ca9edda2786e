//! History entry identifiers
//!
//! An id names one immutable history file, so it doubles as a file stem. It
//! is built from the entry's timestamp plus a short random suffix, which
//! keeps ids unique when several saves land in the same microsecond:
//!
//! ```text
//! 20261019T143005123456Z-9f2c41ab
//! ```
//!
//! Parsing accepts only `[A-Za-z0-9_-]`, which rules out separators, dots
//! and anything else that could escape the history directory.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted id length
pub const MAX_ID_LEN: usize = 128;

/// Length of the random suffix appended to generated ids
const SUFFIX_LEN: usize = 8;

/// Errors from parsing a history id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryIdError {
    #[error("History id is empty")]
    Empty,

    #[error("History id is longer than 128 characters")]
    TooLong,

    #[error("History id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Validated identifier of a history entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HistoryId(String);

impl HistoryId {
    /// Generate a fresh id for an entry written at `timestamp`
    pub fn generate(timestamp: DateTime<Utc>) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}-{}",
            timestamp.format("%Y%m%dT%H%M%S%6fZ"),
            &random[..SUFFIX_LEN]
        ))
    }

    /// Validate an untrusted id string
    pub fn parse(input: &str) -> Result<Self, HistoryIdError> {
        if input.is_empty() {
            return Err(HistoryIdError::Empty);
        }
        if input.len() > MAX_ID_LEN {
            return Err(HistoryIdError::TooLong);
        }
        if let Some(c) = input.chars().find(|c| !is_safe_char(*c)) {
            return Err(HistoryIdError::InvalidCharacter(c));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the entry inside the history directory
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HistoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HistoryId {
    type Error = HistoryIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HistoryId> for String {
    fn from(id: HistoryId) -> Self {
        id.0
    }
}

impl std::str::FromStr for HistoryId {
    type Err = HistoryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 5).unwrap();
        let a = HistoryId::generate(ts);
        let b = HistoryId::generate(ts);

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("20261019T143005000000Z-"));
        assert_eq!(HistoryId::parse(a.as_str()).unwrap(), a);
    }

    #[test]
    fn test_generated_ids_sort_by_time() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert!(HistoryId::generate(earlier) < HistoryId::generate(later));
    }

    #[test]
    fn test_rejects_path_traversal() {
        assert_eq!(
            HistoryId::parse("../secret"),
            Err(HistoryIdError::InvalidCharacter('.'))
        );
        assert!(HistoryId::parse("a/b").is_err());
        assert!(HistoryId::parse("a\\b").is_err());
        assert!(HistoryId::parse("entry.json").is_err());
        assert!(HistoryId::parse("with space").is_err());
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert_eq!(HistoryId::parse(""), Err(HistoryIdError::Empty));
        let long = "a".repeat(MAX_ID_LEN + 1);
        assert_eq!(HistoryId::parse(&long), Err(HistoryIdError::TooLong));
    }

    #[test]
    fn test_file_name() {
        let id = HistoryId::parse("20260101T000000000000Z-abcd1234").unwrap();
        assert_eq!(id.file_name(), "20260101T000000000000Z-abcd1234.json");
    }

    #[test]
    fn test_serde_validates() {
        let ok: HistoryId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(ok.as_str(), "abc-123");
        assert!(serde_json::from_str::<HistoryId>("\"../etc\"").is_err());
    }
}
