use crate::core::{
    errors::ExchangeError,
    kernel::{RestClient, TimeSource},
    types::{OrderBook, ServerTime},
};
use crate::exchanges::aster::rest::AsterRestClient;
use async_trait::async_trait;
use tracing::instrument;

/// Default number of depth levels per side.
pub const DEFAULT_DEPTH_LIMIT: u32 = 10;

/// Public market data for Aster; no credentials involved
#[derive(Debug, Clone)]
pub struct MarketData<R: RestClient> {
    rest: AsterRestClient<R>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: &R) -> Self
    where
        R: Clone,
    {
        Self {
            rest: AsterRestClient::new(rest.clone()),
        }
    }

    /// Depth snapshot; the symbol is upper-cased before sending
    #[instrument(skip(self), fields(exchange = "aster", symbol = %symbol))]
    pub async fn get_depth(&self, symbol: &str, limit: u32) -> Result<OrderBook, ExchangeError> {
        self.rest.get_depth(&symbol.to_uppercase(), limit).await
    }

    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.rest.get_server_time().await
    }
}

/// Aster server time, fetched fresh for every signature
#[async_trait]
impl<R: RestClient> TimeSource for MarketData<R> {
    async fn now_millis(&self) -> Result<u64, ExchangeError> {
        self.get_server_time().await.map(|time| time.server_time)
    }
}
