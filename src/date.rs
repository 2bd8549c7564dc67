use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FlightError;

/// Textual date formats accepted by [`CalendarDate::validate`], tried in
/// priority order. First successful parse wins; output is always canonical
/// `YYYY-MM-DD` regardless of which format matched.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d",   // 2025-05-20 (canonical)
    "%Y/%m/%d",   // 2025/05/20
    "%d %B %Y",   // 20 May 2025
];

/// A validated Gregorian calendar date with no timezone component.
///
/// Immutable once constructed. The only way to obtain one from user text is
/// [`CalendarDate::validate`], so a `CalendarDate` in hand always names a real
/// date.
///
/// ```
/// use flighttools::CalendarDate;
/// let d = CalendarDate::validate("2025-05-20").unwrap();
/// assert_eq!(d.to_string(), "2025-05-20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse `raw` against each accepted format in priority order.
    ///
    /// Fails with [`FlightError::InvalidDateFormat`] when no format matches or
    /// the text encodes a calendrically impossible date (2025-02-30). Pure —
    /// no side effects, no clock access.
    pub fn validate(raw: &str) -> Result<Self, FlightError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FlightError::InvalidDateFormat { input: raw.to_string() });
        }
        ACCEPTED_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(Self)
            .ok_or_else(|| FlightError::InvalidDateFormat { input: raw.to_string() })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Canonical YYYY-MM-DD, the form the price provider expects.
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_round_trips() {
        for raw in ["2025-05-20", "2024-02-29", "1999-12-31", "2025-01-01"] {
            let d = CalendarDate::validate(raw).unwrap();
            assert_eq!(d.to_string(), raw);
        }
    }

    #[test]
    fn alternate_formats_normalize() {
        let slash = CalendarDate::validate("2025/05/20").unwrap();
        let prose = CalendarDate::validate("20 May 2025").unwrap();
        assert_eq!(slash.to_string(), "2025-05-20");
        assert_eq!(prose, slash);
    }

    #[test]
    fn impossible_dates_rejected() {
        for raw in ["2025-02-30", "2025-13-01", "2023-02-29", "2025-04-31"] {
            let err = CalendarDate::validate(raw).unwrap_err();
            assert_eq!(err.kind(), "invalid_date_format", "{raw} should not parse");
        }
    }

    #[test]
    fn unrecognized_text_rejected() {
        for raw in ["", "   ", "tomorrow", "05-20-2025", "20th May", "2025-05"] {
            assert!(CalendarDate::validate(raw).is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn error_carries_input() {
        match CalendarDate::validate("next tuesday") {
            Err(FlightError::InvalidDateFormat { input }) => assert_eq!(input, "next tuesday"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn dates_are_ordered() {
        let out = CalendarDate::validate("2025-05-20").unwrap();
        let ret = CalendarDate::validate("2025-05-27").unwrap();
        assert!(ret > out);
    }
}
