use crate::core::errors::ExchangeError;
use crate::core::kernel::{QueryParams, RestClient, SignedQuery};
use crate::core::types::{OrderBook, OrderResponse, ServerTime};
use crate::exchanges::aster::types::AsterAccountInfo;
use tracing::instrument;

/// Thin typed wrapper around `RestClient` for the Aster spot API
#[derive(Debug, Clone)]
pub struct AsterRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> AsterRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Get order book depth
    #[instrument(skip(self), fields(exchange = "aster"))]
    pub async fn get_depth(&self, symbol: &str, limit: u32) -> Result<OrderBook, ExchangeError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol).push("limit", limit);

        self.client
            .get_json("/api/v1/depth", &params.to_query_string(), &[])
            .await
    }

    /// Get exchange server time
    #[instrument(skip(self), fields(exchange = "aster"))]
    pub async fn get_server_time(&self) -> Result<ServerTime, ExchangeError> {
        self.client.get_json("/api/v1/time", "", &[]).await
    }

    /// Get account information (signed)
    #[instrument(skip_all, fields(exchange = "aster"))]
    pub async fn get_account(
        &self,
        signed: &SignedQuery,
        headers: &[(&str, &str)],
    ) -> Result<AsterAccountInfo, ExchangeError> {
        self.client
            .get_json("/api/v1/account", signed.as_str(), headers)
            .await
    }

    /// Place an order (signed query string as the request body)
    #[instrument(skip_all, fields(exchange = "aster"))]
    pub async fn place_order(
        &self,
        signed: &SignedQuery,
        headers: &[(&str, &str)],
    ) -> Result<OrderResponse, ExchangeError> {
        self.client
            .post_json("/api/v1/order", signed.as_str(), headers)
            .await
    }

    /// Query an order (signed)
    #[instrument(skip_all, fields(exchange = "aster"))]
    pub async fn get_order(
        &self,
        signed: &SignedQuery,
        headers: &[(&str, &str)],
    ) -> Result<OrderResponse, ExchangeError> {
        self.client
            .get_json("/api/v1/order", signed.as_str(), headers)
            .await
    }
}
