pub mod arbitrage;
pub mod core;
pub mod exchanges;

pub use arbitrage::{ArbitrageConfig, ArbitrageEngine};
pub use core::{config::ExchangeConfig, errors::ExchangeError, types::*};
pub use exchanges::aster::AsterConnector;
pub use exchanges::binance_perp::BinancePerpConnector;
