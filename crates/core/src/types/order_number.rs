//! Human-readable order numbers.
//!
//! Distinct from the internal row id: the order number is what shoppers see
//! on the confirmation screen and quote in support chats. Numbers normally
//! come from a database sequence; when the sequence call yields nothing the
//! placement flow falls back to a timestamp-based number so an order can
//! still be taken.

use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

/// A human-readable order identifier, e.g. `KM-000123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Store prefix on every order number.
    pub const PREFIX: &'static str = "KM";

    /// Build an order number from the database sequence value.
    #[must_use]
    pub fn from_sequence(seq: i64) -> Self {
        Self(format!("{}-{seq:06}", Self::PREFIX))
    }

    /// Timestamp fallback used when the sequence yields nothing.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{}-T{}", Self::PREFIX, at.timestamp_millis()))
    }

    /// Wrap a number read back from the database.
    #[must_use]
    pub fn from_raw(raw: String) -> Self {
        Self(raw)
    }

    /// Whether a string looks like one of our order numbers.
    #[must_use]
    pub fn is_well_formed(s: &str) -> bool {
        s.strip_prefix("KM-")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(char::is_alphanumeric))
    }

    /// The order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_sequence_zero_pads() {
        assert_eq!(OrderNumber::from_sequence(123).as_str(), "KM-000123");
        assert_eq!(OrderNumber::from_sequence(1_234_567).as_str(), "KM-1234567");
    }

    #[test]
    fn test_timestamp_fallback_is_well_formed() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single();
        let number = OrderNumber::from_timestamp(at.expect("valid timestamp"));
        assert!(OrderNumber::is_well_formed(number.as_str()));
        assert!(number.as_str().starts_with("KM-T"));
    }

    #[test]
    fn test_well_formed() {
        assert!(OrderNumber::is_well_formed("KM-000123"));
        assert!(OrderNumber::is_well_formed("KM-T1765704413000"));
        assert!(!OrderNumber::is_well_formed("KM-"));
        assert!(!OrderNumber::is_well_formed("XX-000123"));
        assert!(!OrderNumber::is_well_formed("KM-12 34"));
    }
}
