use crate::core::{
    errors::ExchangeError,
    types::{Balance, OrderBook, OrderResponse, OrderSide, Position},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// The venue the arbitrage loop trades first: depth, market orders and fill checks.
#[async_trait]
pub trait SpotExchange: Send + Sync {
    /// Get a depth snapshot for a symbol
    async fn get_depth(&self, symbol: &str, limit: u32) -> Result<OrderBook, ExchangeError>;

    /// Place a market order for `quantity` base units
    async fn market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<OrderResponse, ExchangeError>;

    /// Look up an order by exchange id
    async fn order_status(&self, symbol: &str, order_id: u64)
        -> Result<OrderResponse, ExchangeError>;

    /// Free/locked balance of one asset, `None` when the account does not hold it
    async fn balance(&self, asset: &str) -> Result<Option<Balance>, ExchangeError>;
}

/// The venue used to hedge fills from the [`SpotExchange`].
#[async_trait]
pub trait CounterExchange: Send + Sync {
    async fn fetch_order_book(&self, symbol: &str, depth: u32)
        -> Result<OrderBook, ExchangeError>;

    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        client_order_id: &str,
    ) -> Result<OrderResponse, ExchangeError>;

    async fn fetch_positions(&self, symbols: &[String]) -> Result<Vec<Position>, ExchangeError>;
}
