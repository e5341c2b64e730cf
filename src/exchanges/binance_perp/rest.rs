use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryParams, RestClient, SignedQuery};
use crate::core::types::{OrderBook, OrderResponse};
use crate::exchanges::binance_perp::types::BinancePerpPosition;
use tracing::instrument;

/// REST API operations for Binance Perpetual
#[derive(Debug, Clone)]
pub struct BinancePerpRestClient<R: RestClient> {
    rest: R,
}

impl<R: RestClient> BinancePerpRestClient<R> {
    /// Create a new REST client wrapper
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    /// Get order book for a specific symbol
    #[instrument(skip(self), fields(exchange = "binance_perp", symbol = %symbol))]
    pub async fn get_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol).push_opt("limit", limit);

        self.rest
            .get_json("/fapi/v1/depth", &params.to_query_string(), &[])
            .await
    }

    /// Get account positions (authenticated)
    #[instrument(skip_all, fields(exchange = "binance_perp"))]
    pub async fn get_positions(
        &self,
        signed: &SignedQuery,
        headers: &[(&str, &str)],
    ) -> Result<Vec<BinancePerpPosition>, ExchangeError> {
        self.rest
            .get_json("/fapi/v2/positionRisk", signed.as_str(), headers)
            .await
    }

    /// Place a new order (authenticated)
    #[instrument(skip_all, fields(exchange = "binance_perp"))]
    pub async fn place_order(
        &self,
        signed: &SignedQuery,
        headers: &[(&str, &str)],
    ) -> Result<OrderResponse, ExchangeError> {
        self.rest
            .post_json("/fapi/v1/order", signed.as_str(), headers)
            .await
    }
}
