use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::FlightError;
use crate::types::AirportCode;

/// Cache stops admitting once it holds this many places. The place→code
/// mapping is near-static, so there is no eviction or invalidation.
const CACHE_CAP: usize = 256;

// ── Lookup provider wire types ───────────────────────────

#[derive(serde::Deserialize, Debug)]
struct LookupResponse {
    candidates: Vec<AirportCandidate>,
}

/// One ranked candidate from the lookup provider. The list order is the
/// provider's own relevance ranking.
#[derive(serde::Deserialize, Debug)]
struct AirportCandidate {
    code: String,
    name: String,
    #[serde(default)]
    city: Option<String>,
}

// ── Resolver ─────────────────────────────────────────────

/// Maps a free-text place name ("Mumbai", "new york") to an [`AirportCode`]
/// via the airport-lookup provider.
///
/// # Contract
/// - Matching is case-insensitive; `resolve("Mumbai")` and `resolve("mumbai")`
///   return the same code.
/// - Tie-break among candidates: an exact case-insensitive match on the
///   served city or the airport name beats everything; otherwise the
///   provider's own ranking (first candidate) wins.
/// - Zero candidates → `UnknownPlace` (re-prompt, do not retry).
/// - Network failure, timeout, non-success status, or a malformed body →
///   `LookupUnavailable` (transient, caller may retry).
///
/// One outbound read-only call per uncached invocation. `Send + Sync`; clone
/// the surrounding `Arc` to share across tasks.
pub struct AirportResolver {
    client:   reqwest::Client,
    api_key:  String,
    api_base: String,
    timeout:  Duration,
    cache:    Mutex<HashMap<String, AirportCode>>,
}

impl AirportResolver {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client:   reqwest::Client::new(),
            api_key:  config.airport_api_key.clone(),
            api_base: config.airport_api_base.clone(),
            timeout:  config.lookup_timeout,
            cache:    Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, place_name: &str) -> Result<AirportCode, FlightError> {
        let place = place_name.trim();
        if place.is_empty() {
            return Err(FlightError::UnknownPlace { place: place_name.to_string() });
        }

        let cache_key = place.to_lowercase();
        if let Some(code) = self.cache.lock().unwrap().get(&cache_key) {
            debug!(place, code = code.as_str(), "airport cache hit");
            return Ok(code.clone());
        }

        let code = self.lookup(place).await?;
        info!(place, code = code.as_str(), "resolved airport code");

        let mut cache = self.cache.lock().unwrap();
        if cache.len() < CACHE_CAP {
            cache.insert(cache_key, code.clone());
        }
        Ok(code)
    }

    async fn lookup(&self, place: &str) -> Result<AirportCode, FlightError> {
        debug!(place, "querying airport lookup provider");
        let response = self.client
            .get(format!("{}/v1/airports", self.api_base))
            .header("x-api-key", &self.api_key)
            .query(&[("q", place)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FlightError::LookupUnavailable {
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("network error: {e}")
                },
            })?;

        if !response.status().is_success() {
            return Err(FlightError::LookupUnavailable {
                reason: format!("provider returned HTTP {}", response.status()),
            });
        }

        let parsed: LookupResponse = response.json()
            .await
            .map_err(|e| FlightError::LookupUnavailable {
                reason: format!("malformed provider response: {e}"),
            })?;

        if parsed.candidates.is_empty() {
            return Err(FlightError::UnknownPlace { place: place.to_string() });
        }

        let best = Self::pick(place, &parsed.candidates);
        AirportCode::new(&best.code).map_err(|_| FlightError::LookupUnavailable {
            reason: format!("provider returned malformed code '{}'", best.code),
        })
    }

    /// Exact case-insensitive city/name match first, provider ranking second.
    fn pick<'a>(place: &str, candidates: &'a [AirportCandidate]) -> &'a AirportCandidate {
        candidates
            .iter()
            .find(|c| {
                c.city.as_deref().is_some_and(|city| city.eq_ignore_ascii_case(place))
                    || c.name.eq_ignore_ascii_case(place)
            })
            .unwrap_or(&candidates[0])
    }

    /// Number of cached place→code entries. Test hook.
    pub fn cached_places(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(code: &str, name: &str, city: Option<&str>) -> AirportCandidate {
        AirportCandidate {
            code: code.to_string(),
            name: name.to_string(),
            city: city.map(str::to_string),
        }
    }

    #[test]
    fn exact_city_match_beats_ranking() {
        let candidates = vec![
            candidate("JFK", "John F. Kennedy International", Some("New York")),
            candidate("DEL", "Indira Gandhi International", Some("Delhi")),
        ];
        let best = AirportResolver::pick("delhi", &candidates);
        assert_eq!(best.code, "DEL");
    }

    #[test]
    fn provider_ranking_wins_without_exact_match() {
        let candidates = vec![
            candidate("BOM", "Chhatrapati Shivaji Maharaj International", Some("Mumbai")),
            candidate("PNQ", "Pune Airport", Some("Pune")),
        ];
        let best = AirportResolver::pick("mum", &candidates);
        assert_eq!(best.code, "BOM");
    }

    #[test]
    fn exact_airport_name_match_counts() {
        let candidates = vec![
            candidate("LHR", "Heathrow", Some("London")),
            candidate("LGW", "Gatwick", Some("London")),
        ];
        let best = AirportResolver::pick("gatwick", &candidates);
        assert_eq!(best.code, "LGW");
    }
}
