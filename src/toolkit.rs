//! The three flight tools exposed to the agent runtime.
//!
//! Each tool takes JSON arguments and returns a serialized JSON object with a
//! `"status"` field: `"success"`, `"no_results"` (a valid empty search), or
//! `"error"` with the error kind and message. The runtime renders these back
//! into natural language; nothing here formats prose beyond the `no_results`
//! summary line.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use crate::date::CalendarDate;
use crate::error::FlightError;
use crate::resolver::AirportResolver;
use crate::search::FlightSearchClient;
use crate::tools::Tool;
use crate::types::{AirportCode, FlightSearchRequest};

fn error_json(err: &FlightError) -> String {
    json!({
        "status":  "error",
        "kind":    err.kind(),
        "message": err.to_string(),
    })
    .to_string()
}

fn missing_arg(name: &str) -> String {
    json!({
        "status":  "error",
        "kind":    "invalid_arguments",
        "message": format!("required argument '{name}' is missing or not a string"),
    })
    .to_string()
}

fn required_str<'a>(args: &'a HashMap<String, Value>, name: &str) -> Result<&'a str, String> {
    args.get(name).and_then(Value::as_str).ok_or_else(|| missing_arg(name))
}

// ── validate_date_format ─────────────────────────────────

/// Validates a date string and returns it in canonical `YYYY-MM-DD` form.
/// Pure; the runtime calls it before asking for a price search.
pub struct ValidateDateTool;

#[async_trait]
impl Tool for ValidateDateTool {
    fn name(&self) -> &str {
        "validate_date_format"
    }

    fn description(&self) -> &str {
        "Validate a travel date and normalize it to YYYY-MM-DD. \
         Use this before calling get_flight_prices. Fails if the text is not \
         a recognized format or not a real calendar date."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "The date to validate, e.g. '2025-05-20'"
                }
            },
            "required": ["date"]
        })
    }

    async fn execute(&self, args: &HashMap<String, Value>) -> Result<String, String> {
        let raw = required_str(args, "date")?;
        match CalendarDate::validate(raw) {
            Ok(date) => Ok(json!({ "status": "success", "date": date.to_string() }).to_string()),
            Err(err) => Err(error_json(&err)),
        }
    }
}

// ── get_airport_code ─────────────────────────────────────

/// Resolves a free-text city or airport name to its IATA code.
pub struct AirportCodeTool {
    resolver: Arc<AirportResolver>,
}

impl AirportCodeTool {
    pub fn new(resolver: Arc<AirportResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for AirportCodeTool {
    fn name(&self) -> &str {
        "get_airport_code"
    }

    fn description(&self) -> &str {
        "Look up the 3-letter IATA airport code for a city or airport name, \
         e.g. 'Mumbai' -> 'BOM'. Use this before calling get_flight_prices \
         whenever the user gave a place name instead of a code."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city_name": {
                    "type": "string",
                    "description": "City or airport name, any casing"
                }
            },
            "required": ["city_name"]
        })
    }

    async fn execute(&self, args: &HashMap<String, Value>) -> Result<String, String> {
        let city = required_str(args, "city_name")?;
        match self.resolver.resolve(city).await {
            Ok(code) => Ok(json!({
                "status":       "success",
                "city_name":    city,
                "airport_code": code.as_str(),
            })
            .to_string()),
            Err(err) => {
                warn!(city, kind = err.kind(), "airport code lookup failed");
                Err(error_json(&err))
            }
        }
    }
}

// ── get_flight_prices ────────────────────────────────────

/// Searches priced itineraries between two airports on given dates.
pub struct FlightPricesTool {
    search: Arc<FlightSearchClient>,
}

impl FlightPricesTool {
    pub fn new(search: Arc<FlightSearchClient>) -> Self {
        Self { search }
    }

    fn parse_request(args: &HashMap<String, Value>) -> Result<FlightSearchRequest, String> {
        let origin = AirportCode::new(required_str(args, "departure_id")?)
            .map_err(|e| error_json(&e))?;
        let destination = AirportCode::new(required_str(args, "arrival_id")?)
            .map_err(|e| error_json(&e))?;
        let outbound = CalendarDate::validate(required_str(args, "outbound_date")?)
            .map_err(|e| error_json(&e))?;

        // return_date is optional; null counts as absent
        let return_date = match args.get("return_date") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => {
                Some(CalendarDate::validate(raw).map_err(|e| error_json(&e))?)
            }
            Some(_) => return Err(missing_arg("return_date")),
        };

        FlightSearchRequest::new(origin, destination, outbound, return_date)
            .map_err(|e| error_json(&e))
    }

    fn search_params(request: &FlightSearchRequest) -> Value {
        json!({
            "from":          request.origin.as_str(),
            "to":            request.destination.as_str(),
            "outbound_date": request.outbound.to_string(),
            "return_date":   request.return_date.map(|d| d.to_string()),
            "trip_type":     request.trip_type(),
        })
    }
}

#[async_trait]
impl Tool for FlightPricesTool {
    fn name(&self) -> &str {
        "get_flight_prices"
    }

    fn description(&self) -> &str {
        "Search flight prices between two 3-letter IATA airport codes. Dates \
         must already be in YYYY-MM-DD form. Omit return_date for a one-way \
         search. Returns priced offers in the provider's order (typically \
         cheapest first), or status 'no_results' when no flights exist."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "departure_id": {
                    "type": "string",
                    "description": "Origin airport IATA code, e.g. 'BOM'"
                },
                "arrival_id": {
                    "type": "string",
                    "description": "Destination airport IATA code, e.g. 'DEL'"
                },
                "outbound_date": {
                    "type": "string",
                    "description": "Departure date, YYYY-MM-DD"
                },
                "return_date": {
                    "type": "string",
                    "description": "Return date, YYYY-MM-DD. Omit for one-way."
                }
            },
            "required": ["departure_id", "arrival_id", "outbound_date"]
        })
    }

    async fn execute(&self, args: &HashMap<String, Value>) -> Result<String, String> {
        let request = Self::parse_request(args)?;
        let params  = Self::search_params(&request);

        match self.search.search(&request).await {
            Ok(offers) if offers.is_empty() => {
                let mut message = format!(
                    "No flights found for {} to {} on {}",
                    request.origin, request.destination, request.outbound,
                );
                match request.return_date {
                    Some(ret) => message.push_str(&format!(" returning {ret}.")),
                    None      => message.push_str(" (one-way)."),
                }
                Ok(json!({
                    "status":        "no_results",
                    "message":       message,
                    "search_params": params,
                })
                .to_string())
            }
            Ok(offers) => Ok(json!({
                "status":        "success",
                "search_params": params,
                "offers":        offers,
            })
            .to_string()),
            Err(err) => {
                warn!(kind = err.kind(), "flight price search failed");
                Err(error_json(&err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn validate_date_tool_success() {
        let mut args = HashMap::new();
        args.insert("date".to_string(), json!("2025/05/20"));
        let out = ValidateDateTool.execute(&args).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["date"], "2025-05-20");
    }

    #[tokio::test]
    async fn validate_date_tool_impossible_date() {
        let mut args = HashMap::new();
        args.insert("date".to_string(), json!("2025-02-30"));
        let err = ValidateDateTool.execute(&args).await.unwrap_err();
        let parsed: Value = serde_json::from_str(&err).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["kind"], "invalid_date_format");
        assert!(parsed["message"].as_str().unwrap().contains("2025-02-30"));
    }

    #[tokio::test]
    async fn validate_date_tool_missing_arg() {
        let err = ValidateDateTool.execute(&HashMap::new()).await.unwrap_err();
        let parsed: Value = serde_json::from_str(&err).unwrap();
        assert_eq!(parsed["kind"], "invalid_arguments");
    }

    #[test]
    fn parse_request_rejects_bad_return_date_order() {
        let mut args = HashMap::new();
        args.insert("departure_id".to_string(), json!("BOM"));
        args.insert("arrival_id".to_string(), json!("DEL"));
        args.insert("outbound_date".to_string(), json!("2025-05-20"));
        args.insert("return_date".to_string(), json!("2025-05-10"));
        let err = FlightPricesTool::parse_request(&args).unwrap_err();
        let parsed: Value = serde_json::from_str(&err).unwrap();
        assert_eq!(parsed["kind"], "invalid_request");
    }

    #[test]
    fn parse_request_treats_null_return_as_absent() {
        let mut args = HashMap::new();
        args.insert("departure_id".to_string(), json!("bom"));
        args.insert("arrival_id".to_string(), json!("del"));
        args.insert("outbound_date".to_string(), json!("2025-05-20"));
        args.insert("return_date".to_string(), json!(null));
        let request = FlightPricesTool::parse_request(&args).unwrap();
        assert_eq!(request.trip_type(), "one-way");
        assert_eq!(request.origin.as_str(), "BOM");
    }
}
