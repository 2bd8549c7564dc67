use std::time::Duration;

use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::FlightError;
use crate::types::{FlightOffer, FlightOfferList, FlightSearchRequest};

// ── Price provider wire types ────────────────────────────

#[derive(serde::Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    best_flights:  Vec<Itinerary>,
    #[serde(default)]
    other_flights: Vec<Itinerary>,
    /// Provider-level failure reported inside a 200 body.
    error:         Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct Itinerary {
    flights: Vec<Leg>,
    price:   f64,
}

#[derive(serde::Deserialize, Debug)]
struct Leg {
    airline:           String,
    departure_airport: Endpoint,
    arrival_airport:   Endpoint,
}

#[derive(serde::Deserialize, Debug)]
struct Endpoint {
    time: String,
}

// ── Search client ────────────────────────────────────────

/// Queries the flight-price provider and maps its response into an ordered
/// [`FlightOfferList`].
///
/// # Contract
/// - Re-validates the request invariants (origin ≠ destination, return ≥
///   outbound) and fails with `InvalidRequest` before any network call.
/// - Zero itineraries is an empty list, not an error — "no flights found" is
///   a representable outcome.
/// - Provider order is preserved: recommended itineraries first, then the
///   remainder, exactly as returned.
/// - Any provider failure (network, timeout, auth, rate limit, malformed or
///   error-carrying body) → `SearchProviderError`, surfaced unmodified. No
///   automatic retry and never a partial list.
pub struct FlightSearchClient {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
    timeout:  Duration,
    currency: String,
}

impl FlightSearchClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client:   reqwest::Client::new(),
            api_key:  config.flights_api_key.clone(),
            api_base: config.flights_api_base.clone(),
            timeout:  config.search_timeout,
            currency: config.currency.clone(),
        }
    }

    pub async fn search(&self, request: &FlightSearchRequest) -> Result<FlightOfferList, FlightError> {
        request.check()?;

        let mut params = vec![
            ("departure_id",  request.origin.as_str().to_string()),
            ("arrival_id",    request.destination.as_str().to_string()),
            ("outbound_date", request.outbound.to_string()),
            ("currency",      self.currency.clone()),
        ];
        match request.return_date {
            Some(ret) => params.push(("return_date", ret.to_string())),
            // type=2 marks a one-way search in the provider's scheme
            None      => params.push(("type", "2".to_string())),
        }

        debug!(
            origin      = request.origin.as_str(),
            destination = request.destination.as_str(),
            outbound    = %request.outbound,
            trip_type   = request.trip_type(),
            "querying flight price provider"
        );

        let response = self.client
            .get(format!("{}/v1/search", self.api_base))
            .header("x-api-key", &self.api_key)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FlightError::SearchProviderError {
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("network error: {e}")
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = match status.as_u16() {
                401 => "authentication failed (HTTP 401), check credentials".to_string(),
                429 => "rate limited (HTTP 429), try again later".to_string(),
                _   => format!("provider returned HTTP {status}"),
            };
            return Err(FlightError::SearchProviderError { reason });
        }

        let parsed: SearchResponse = response.json()
            .await
            .map_err(|e| FlightError::SearchProviderError {
                reason: format!("malformed provider response: {e}"),
            })?;

        if let Some(message) = parsed.error {
            return Err(FlightError::SearchProviderError {
                reason: format!("provider error: {message}"),
            });
        }

        let mut offers = Vec::with_capacity(parsed.best_flights.len() + parsed.other_flights.len());
        for itinerary in parsed.best_flights.into_iter().chain(parsed.other_flights) {
            offers.push(self.to_offer(itinerary)?);
        }

        info!(
            origin      = request.origin.as_str(),
            destination = request.destination.as_str(),
            offers      = offers.len(),
            "flight search complete"
        );
        Ok(offers)
    }

    /// Carrier and departure come from the first leg, arrival from the last;
    /// stops = legs − 1. Provider fields outside this shape are dropped.
    fn to_offer(&self, itinerary: Itinerary) -> Result<FlightOffer, FlightError> {
        let (first, last) = match (itinerary.flights.first(), itinerary.flights.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(FlightError::SearchProviderError {
                    reason: "provider returned an itinerary with no legs".to_string(),
                })
            }
        };
        Ok(FlightOffer {
            carrier:   first.airline.clone(),
            price:     itinerary.price,
            currency:  self.currency.clone(),
            departure: first.departure_airport.time.clone(),
            arrival:   last.arrival_airport.time.clone(),
            stops:     (itinerary.flights.len() - 1) as u32,
        })
    }
}
