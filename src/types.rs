use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::FlightError;

/// A short uppercase IATA-style code identifying an airport or city.
///
/// Construction uppercases the input and enforces the 3-ASCII-letter shape;
/// whether the code actually exists is the lookup provider's call and is
/// checked at resolution time, not here.
///
/// ```
/// use flighttools::AirportCode;
/// let code = AirportCode::new("bom").unwrap();
/// assert_eq!(code.as_str(), "BOM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportCode(String);

impl AirportCode {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FlightError> {
        let raw = raw.as_ref().trim();
        if raw.len() == 3 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(raw.to_ascii_uppercase()))
        } else {
            Err(FlightError::InvalidRequest {
                reason: format!("'{raw}' is not a 3-letter IATA code"),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display = the raw code; used when building provider query strings.
impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-way or round-trip search parameters, invariants enforced at
/// construction: origin ≠ destination, and a return date never precedes the
/// outbound date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub origin:      AirportCode,
    pub destination: AirportCode,
    pub outbound:    CalendarDate,
    pub return_date: Option<CalendarDate>,
}

impl FlightSearchRequest {
    pub fn new(
        origin:      AirportCode,
        destination: AirportCode,
        outbound:    CalendarDate,
        return_date: Option<CalendarDate>,
    ) -> Result<Self, FlightError> {
        let request = Self { origin, destination, outbound, return_date };
        request.check()?;
        Ok(request)
    }

    /// Re-run the construction invariants. The search client calls this again
    /// before touching the network so a hand-built request can never forward
    /// an invalid query to the provider.
    pub fn check(&self) -> Result<(), FlightError> {
        if self.origin == self.destination {
            return Err(FlightError::InvalidRequest {
                reason: format!("origin and destination are both {}", self.origin),
            });
        }
        if let Some(ret) = self.return_date {
            if ret < self.outbound {
                return Err(FlightError::InvalidRequest {
                    reason: format!("return date {ret} precedes outbound date {}", self.outbound),
                });
            }
        }
        Ok(())
    }

    /// `"one-way"` or `"round-trip"`, echoed in tool results.
    pub fn trip_type(&self) -> &'static str {
        if self.return_date.is_some() { "round-trip" } else { "one-way" }
    }
}

/// A single priced itinerary from the price provider.
///
/// Read-only: constructed by the search client from the provider response and
/// never mutated afterwards. Timestamps are the provider's local-time strings,
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub carrier:   String,
    pub price:     f64,
    pub currency:  String,
    pub departure: String,
    pub arrival:   String,
    pub stops:     u32,
}

/// Offers in the order the provider returned them (typically price-ascending).
/// Rebuilt per request, never cached.
pub type FlightOfferList = Vec<FlightOffer>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::validate(s).unwrap()
    }

    #[test]
    fn airport_code_uppercases() {
        assert_eq!(AirportCode::new("bom").unwrap(), AirportCode::new("BOM").unwrap());
        assert_eq!(AirportCode::new(" del ").unwrap().as_str(), "DEL");
    }

    #[test]
    fn airport_code_shape_enforced() {
        for raw in ["", "BO", "BOMB", "B0M", "München"] {
            assert!(AirportCode::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn same_origin_destination_rejected() {
        let err = FlightSearchRequest::new(
            AirportCode::new("BOM").unwrap(),
            AirportCode::new("bom").unwrap(),
            date("2025-05-20"),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn return_before_outbound_rejected() {
        let err = FlightSearchRequest::new(
            AirportCode::new("BOM").unwrap(),
            AirportCode::new("DEL").unwrap(),
            date("2025-05-20"),
            Some(date("2025-05-19")),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn same_day_round_trip_allowed() {
        let req = FlightSearchRequest::new(
            AirportCode::new("BOM").unwrap(),
            AirportCode::new("DEL").unwrap(),
            date("2025-05-20"),
            Some(date("2025-05-20")),
        )
        .unwrap();
        assert_eq!(req.trip_type(), "round-trip");
    }
}
