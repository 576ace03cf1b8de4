//! Calendar month keys.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ModelError;

/// A calendar month in `YYYY-MM` form.
///
/// The key is zero-padded, so string order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// Parse and validate a `YYYY-MM` key.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let bytes = raw.as_bytes();
        let digits = |part: &[u8]| part.iter().all(u8::is_ascii_digit);
        if bytes.len() != 7 || bytes[4] != b'-' || !digits(&bytes[..4]) || !digits(&bytes[5..]) {
            return Err(ModelError::InvalidMonth(raw.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .map_err(|_| ModelError::InvalidMonth(raw.to_string()))?;
        Ok(Self(raw.to_string()))
    }

    /// Build a key from a compile-time constant known to be well-formed.
    pub(crate) fn from_trusted(raw: &str) -> Self {
        debug_assert!(Self::parse(raw).is_ok(), "malformed month key {raw}");
        Self(raw.to_string())
    }

    /// The raw `YYYY-MM` key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in `parse`, so the fallback is unreachable.
        NaiveDate::parse_from_str(&format!("{}-01", self.0), "%Y-%m-%d")
            .unwrap_or(NaiveDate::MIN)
    }

    /// Short display label, e.g. `May 2024`.
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }
}

impl FromStr for MonthKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
