use crate::core::{errors::ExchangeError, kernel::RestClient, types::OrderBook};
use crate::exchanges::binance_perp::rest::BinancePerpRestClient;
use tracing::instrument;

/// Market data implementation for Binance Perpetual
#[derive(Debug, Clone)]
pub struct MarketData<R: RestClient> {
    rest: BinancePerpRestClient<R>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: BinancePerpRestClient::new(rest.clone()),
        }
    }

    #[instrument(skip(self), fields(exchange = "binance_perp"))]
    pub async fn get_order_book(
        &self,
        symbol: &str,
        depth: u32,
    ) -> Result<OrderBook, ExchangeError> {
        self.rest
            .get_order_book(&symbol.to_uppercase(), Some(depth))
            .await
    }
}
