//! End-to-end tool walkthrough: resolve both cities, validate the date, then
//! search prices — the same call order an agent runtime would use.
//!
//! Requires AIRPORT_LOOKUP_API_KEY and FLIGHT_SEARCH_API_KEY in the
//! environment. Run with: `cargo run --example flight_tools_demo`

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::info;

use flighttools::ToolsetBuilder;

fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let toolset  = ToolsetBuilder::new().config_from_env().build()?;
    let registry = toolset.registry();

    info!(tools = registry.len(), "flight toolset ready");
    for schema in registry.schemas() {
        println!("tool: {} — {}", schema.name, schema.description);
    }

    // What the runtime would do for: "find flights from Mumbai to Delhi on 2025-05-20"
    let date = registry
        .execute("validate_date_format", &args(&[("date", json!("2025-05-20"))]))
        .await
        .map_err(|e| anyhow::anyhow!("date validation failed: {e}"))?;
    println!("\nvalidate_date_format -> {date}");

    let mut codes = Vec::new();
    for city in ["Mumbai", "Delhi"] {
        let result = registry
            .execute("get_airport_code", &args(&[("city_name", json!(city))]))
            .await
            .map_err(|e| anyhow::anyhow!("airport lookup failed: {e}"))?;
        println!("get_airport_code({city}) -> {result}");
        let parsed: Value = serde_json::from_str(&result)?;
        codes.push(parsed["airport_code"].as_str().unwrap_or_default().to_string());
    }

    let prices = registry
        .execute(
            "get_flight_prices",
            &args(&[
                ("departure_id",  json!(codes[0])),
                ("arrival_id",    json!(codes[1])),
                ("outbound_date", json!("2025-05-20")),
            ]),
        )
        .await
        .map_err(|e| anyhow::anyhow!("price search failed: {e}"))?;
    println!("get_flight_prices -> {prices}");

    Ok(())
}
