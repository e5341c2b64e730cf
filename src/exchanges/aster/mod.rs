pub mod rest; // thin typed wrapper around RestClient
pub mod types; // serde structs and request parameters

pub mod builder;
pub mod connector;

/// Production spot API endpoint
pub const DEFAULT_BASE_URL: &str = "https://sapi.asterdex.com";

pub use builder::build_connector;
pub use connector::{AsterConnector, MarketData, Trading, DEFAULT_DEPTH_LIMIT};
pub use rest::AsterRestClient;
pub use types::*;
