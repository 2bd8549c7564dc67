use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::FlightError;
use crate::resolver::AirportResolver;
use crate::search::FlightSearchClient;
use crate::toolkit::{AirportCodeTool, FlightPricesTool, ValidateDateTool};
use crate::tools::ToolRegistry;

/// Builds the flight toolset: provider clients constructed once from a
/// [`ProviderConfig`], all three tools registered into a [`ToolRegistry`].
///
/// # Example
/// ```no_run
/// use flighttools::ToolsetBuilder;
///
/// let toolset = ToolsetBuilder::new().config_from_env().build()?;
/// assert!(toolset.registry().has("get_flight_prices"));
/// # Ok::<(), flighttools::FlightError>(())
/// ```
pub struct ToolsetBuilder {
    config: Option<Result<ProviderConfig, FlightError>>,
}

impl ToolsetBuilder {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = Some(Ok(config)); self
    }

    /// Read credentials from the environment. A missing variable surfaces at
    /// `build()` as a `Config` error.
    pub fn config_from_env(mut self) -> Self {
        self.config = Some(ProviderConfig::from_env()); self
    }

    pub fn build(self) -> Result<FlightToolset, FlightError> {
        let config = self
            .config
            .ok_or_else(|| FlightError::Config("provider configuration is required".to_string()))??;

        let resolver = Arc::new(AirportResolver::new(&config));
        let search   = Arc::new(FlightSearchClient::new(&config));

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(ValidateDateTool));
        registry.register(Box::new(AirportCodeTool::new(Arc::clone(&resolver))));
        registry.register(Box::new(FlightPricesTool::new(Arc::clone(&search))));

        Ok(FlightToolset { registry, resolver, search })
    }
}

impl Default for ToolsetBuilder {
    fn default() -> Self { Self::new() }
}

/// The built toolset. The registry is what gets handed to the agent runtime;
/// the typed clients stay reachable for callers that want to skip the JSON
/// tool boundary.
pub struct FlightToolset {
    registry: ToolRegistry,
    resolver: Arc<AirportResolver>,
    search:   Arc<FlightSearchClient>,
}

impl std::fmt::Debug for FlightToolset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightToolset").finish_non_exhaustive()
    }
}

impl FlightToolset {
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> ToolRegistry {
        self.registry
    }

    pub fn resolver(&self) -> &AirportResolver {
        &self.resolver
    }

    pub fn search(&self) -> &FlightSearchClient {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_config_fails() {
        let err = ToolsetBuilder::new().build().unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn build_registers_all_three_tools() {
        let toolset = ToolsetBuilder::new()
            .config(ProviderConfig::new("ak", "fk"))
            .build()
            .unwrap();
        let registry = toolset.registry();
        assert_eq!(registry.len(), 3);
        for name in ["validate_date_format", "get_airport_code", "get_flight_prices"] {
            assert!(registry.has(name), "missing tool {name}");
        }
    }
}
