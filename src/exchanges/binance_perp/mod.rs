pub mod conversions; // wire rows to core types
pub mod rest; // thin typed wrapper around RestClient
pub mod types; // serde structs and request parameters

pub mod builder;
pub mod connector;

pub use builder::{build_connector, DEFAULT_BASE_URL};
pub use connector::BinancePerpConnector;
pub use conversions::*;
pub use rest::BinancePerpRestClient;
pub use types::*;
