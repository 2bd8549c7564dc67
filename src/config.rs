use std::time::Duration;

use crate::error::FlightError;

/// Environment variable holding the airport-lookup provider credential.
pub const AIRPORT_KEY_VAR: &str = "AIRPORT_LOOKUP_API_KEY";
/// Environment variable holding the flight-price provider credential.
pub const FLIGHTS_KEY_VAR: &str = "FLIGHT_SEARCH_API_KEY";

/// Everything the toolset needs to talk to its two providers.
///
/// Built once at startup and handed to each component at construction —
/// components never read the environment per call. A missing credential is a
/// `Config` error here, not a per-request failure later.
///
/// Base URLs and timeouts have working defaults; tests override the bases to
/// point at a local mock server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub airport_api_key:  String,
    pub flights_api_key:  String,
    pub airport_api_base: String,
    pub flights_api_base: String,
    pub lookup_timeout:   Duration,
    pub search_timeout:   Duration,
    /// Currency requested from the price provider and stamped on every offer.
    pub currency:         String,
}

impl ProviderConfig {
    pub fn new(airport_api_key: impl Into<String>, flights_api_key: impl Into<String>) -> Self {
        Self {
            airport_api_key:  airport_api_key.into(),
            flights_api_key:  flights_api_key.into(),
            airport_api_base: "https://api.airportlookup.example.com".to_string(),
            flights_api_base: "https://api.flightprices.example.com".to_string(),
            lookup_timeout:   Duration::from_secs(15),
            search_timeout:   Duration::from_secs(30),
            currency:         "USD".to_string(),
        }
    }

    /// Read both credentials from the process environment.
    ///
    /// Absence of either is a startup-time configuration error.
    pub fn from_env() -> Result<Self, FlightError> {
        let airport = std::env::var(AIRPORT_KEY_VAR)
            .map_err(|_| FlightError::Config(format!("{AIRPORT_KEY_VAR} not set")))?;
        let flights = std::env::var(FLIGHTS_KEY_VAR)
            .map_err(|_| FlightError::Config(format!("{FLIGHTS_KEY_VAR} not set")))?;
        Ok(Self::new(airport, flights))
    }

    pub fn airport_api_base(mut self, base: impl Into<String>) -> Self {
        self.airport_api_base = base.into(); self
    }

    pub fn flights_api_base(mut self, base: impl Into<String>) -> Self {
        self.flights_api_base = base.into(); self
    }

    pub fn lookup_timeout(mut self, t: Duration) -> Self {
        self.lookup_timeout = t; self
    }

    pub fn search_timeout(mut self, t: Duration) -> Self {
        self.search_timeout = t; self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into(); self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_stick() {
        let config = ProviderConfig::new("ak", "fk")
            .airport_api_base("http://127.0.0.1:9000")
            .currency("INR")
            .search_timeout(Duration::from_secs(5));
        assert_eq!(config.airport_api_base, "http://127.0.0.1:9000");
        assert_eq!(config.currency, "INR");
        assert_eq!(config.search_timeout, Duration::from_secs(5));
        // untouched defaults survive
        assert_eq!(config.lookup_timeout, Duration::from_secs(15));
    }
}
