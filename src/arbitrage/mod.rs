//! Spot/perpetual arbitrage between Aster and a counter-exchange.
//!
//! Each iteration compares the top of both books. When the counter bid is
//! sufficiently above the Aster ask the loop buys on Aster and, once the
//! order is confirmed filled, sells the same quantity on the counter-exchange;
//! the mirror image applies on the sell side.

pub mod config;
pub mod engine;
pub mod journal;

pub use config::ArbitrageConfig;
pub use engine::{generate_client_order_id, ArbitrageEngine, Direction, IterationReport, Outcome};
pub use journal::{DailyFileJournal, Journal};
