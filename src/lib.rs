pub mod types;
pub mod date;
pub mod config;
pub mod resolver;
pub mod search;
pub mod tools;
pub mod toolkit;
pub mod builder;
pub mod error;

// Convenience re-exports at crate root
pub use builder::{FlightToolset, ToolsetBuilder};
pub use config::ProviderConfig;
pub use date::CalendarDate;
pub use error::FlightError;
pub use resolver::AirportResolver;
pub use search::FlightSearchClient;
pub use toolkit::{AirportCodeTool, FlightPricesTool, ValidateDateTool};
pub use tools::{Tool, ToolRegistry, ToolSchema};
pub use types::{AirportCode, FlightOffer, FlightOfferList, FlightSearchRequest};
