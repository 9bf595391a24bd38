use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// Canonical, totally ordered key for one chart week.
///
/// Ordering follows calendar-date semantics, never the textual form of the
/// source token: `"2024-02-05"` and `"5/2/2024"` normalize to the same key.
/// All format-specific parsing lives here; the rest of the pipeline only
/// compares opaque `WeekKey` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// Normalize a raw week token.
    ///
    /// Accepted forms:
    /// - ISO date strings like `2024-02-05`
    /// - slash-delimited day/month/year tokens like `05/02/2024`
    ///
    /// ### Errors
    /// `ChartError::MalformedTimeToken` when the token does not describe a
    /// valid calendar date (e.g., `31/02/2024`).
    pub fn normalize(token: &str) -> Result<Self, ChartError> {
        let trimmed = token.trim();
        if trimmed.contains('/') {
            return Self::from_slash_token(trimmed)
                .ok_or_else(|| ChartError::MalformedTimeToken(token.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ChartError::MalformedTimeToken(token.to_string()))
    }

    fn from_slash_token(token: &str) -> Option<Self> {
        let mut parts = token.splitn(3, '/');
        let day: u32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        let year: i32 = parts.next()?.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The calendar date behind this key.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Renders the canonical ISO form used in the interchange `weeks` array.
impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_and_slash_tokens_normalize_to_the_same_key() {
        let iso = WeekKey::normalize("2024-02-05").unwrap();
        let slash = WeekKey::normalize("5/2/2024").unwrap();
        assert_eq!(iso, slash);
        assert_eq!(iso.to_string(), "2024-02-05");
    }

    #[test]
    fn ordering_follows_calendar_dates_not_strings() {
        // "9/1/2024" sorts before "10/1/2024" even though the strings don't.
        let a = WeekKey::normalize("9/1/2024").unwrap();
        let b = WeekKey::normalize("10/1/2024").unwrap();
        assert!(a < b);
    }

    #[test]
    fn invalid_calendar_dates_are_rejected() {
        let err = WeekKey::normalize("31/02/2024").unwrap_err();
        assert_eq!(err, ChartError::MalformedTimeToken("31/02/2024".into()));
        assert!(WeekKey::normalize("2024-13-01").is_err());
        assert!(WeekKey::normalize("not-a-date").is_err());
        assert!(WeekKey::normalize("").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(
            WeekKey::normalize(" 2024-02-05 ").unwrap(),
            WeekKey::normalize("2024-02-05").unwrap()
        );
    }
}
