use thiserror::Error;

/// Every failure the flight toolset can surface to the agent runtime.
///
/// # Contract
/// - `InvalidDateFormat`, `UnknownPlace`, and `InvalidRequest` are caller/user
///   errors — the runtime should re-prompt, not retry.
/// - `LookupUnavailable` and `SearchProviderError` are provider failures —
///   transient at least some of the time, so the runtime may retry them.
/// - `Config` is raised once at startup when a credential is missing; it is
///   never returned from a per-request operation.
///
/// Every variant keeps the original input or the provider's own message so the
/// runtime can choose a recovery action. None is fatal to the hosting process.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("'{input}' is not a recognized date (expected YYYY-MM-DD)")]
    InvalidDateFormat { input: String },

    #[error("no airport found for '{place}'")]
    UnknownPlace { place: String },

    #[error("airport lookup unavailable: {reason}")]
    LookupUnavailable { reason: String },

    #[error("flight search failed: {reason}")]
    SearchProviderError { reason: String },

    #[error("invalid search request: {reason}")]
    InvalidRequest { reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FlightError {
    /// Stable snake_case discriminant, used in tool-boundary JSON so the
    /// runtime can branch without parsing the human-readable message.
    pub fn kind(&self) -> &'static str {
        match self {
            FlightError::InvalidDateFormat { .. }   => "invalid_date_format",
            FlightError::UnknownPlace { .. }        => "unknown_place",
            FlightError::LookupUnavailable { .. }   => "lookup_unavailable",
            FlightError::SearchProviderError { .. } => "search_provider_error",
            FlightError::InvalidRequest { .. }      => "invalid_request",
            FlightError::Config(_)                  => "config",
        }
    }

    /// True if the caller may reasonably retry the same call unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlightError::LookupUnavailable { .. } | FlightError::SearchProviderError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        let err = FlightError::UnknownPlace { place: "Qzxyplace123".into() };
        assert_eq!(err.kind(), "unknown_place");
        assert!(!err.is_retryable());

        let err = FlightError::LookupUnavailable { reason: "timeout".into() };
        assert!(err.is_retryable());
    }

    #[test]
    fn messages_carry_original_input() {
        let err = FlightError::InvalidDateFormat { input: "20th May".into() };
        assert!(err.to_string().contains("20th May"));
    }
}
