use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::CounterExchange;
use crate::core::types::{OrderBook, OrderResponse, OrderSide, Position};
use crate::exchanges::binance_perp::types::BinancePerpOrderRequest;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Binance Perpetual connector that composes all sub-component implementations
///
/// Trading and account access are only present when credentials were supplied.
pub struct BinancePerpConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Option<Trading<R>>,
    pub account: Option<Account<R>>,
}

impl<R: RestClient> BinancePerpConnector<R> {
    pub const fn is_authenticated(&self) -> bool {
        self.trading.is_some()
    }

    fn trading(&self) -> Result<&Trading<R>, ExchangeError> {
        self.trading
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)
    }

    fn account(&self) -> Result<&Account<R>, ExchangeError> {
        self.account
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)
    }
}

#[async_trait]
impl<R: RestClient> CounterExchange for BinancePerpConnector<R> {
    async fn fetch_order_book(&self, symbol: &str, depth: u32) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(symbol, depth).await
    }

    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        client_order_id: &str,
    ) -> Result<OrderResponse, ExchangeError> {
        let order = BinancePerpOrderRequest::market(symbol, side, quantity)
            .client_order_id(client_order_id);
        self.trading()?.place_order(&order).await
    }

    async fn fetch_positions(&self, symbols: &[String]) -> Result<Vec<Position>, ExchangeError> {
        self.account()?.get_positions(symbols).await
    }
}
