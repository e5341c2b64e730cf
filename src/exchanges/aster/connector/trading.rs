use crate::core::{
    errors::ExchangeError,
    kernel::{QueryParams, RequestSigner, RestClient, TimeSource},
    types::{Balance, OrderResponse, OrderSide},
};
use crate::exchanges::aster::connector::market_data::MarketData;
use crate::exchanges::aster::rest::AsterRestClient;
use crate::exchanges::aster::types::{AsterAccountInfo, AsterOrderQuery, AsterOrderRequest};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Authenticated spot trading for Aster
///
/// Every call signs a fresh parameter string; with the default time source
/// that costs one `GET /api/v1/time` round trip per request.
pub struct Trading<R: RestClient, T: TimeSource = MarketData<R>> {
    rest: AsterRestClient<R>,
    signer: RequestSigner<T>,
    recv_window: u64,
}

impl<R: RestClient, T: TimeSource> std::fmt::Debug for Trading<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trading")
            .field("recv_window", &self.recv_window)
            .finish_non_exhaustive()
    }
}

impl<R: RestClient, T: TimeSource> Trading<R, T> {
    pub fn new(rest: &R, signer: RequestSigner<T>, recv_window: u64) -> Self
    where
        R: Clone,
    {
        Self {
            rest: AsterRestClient::new(rest.clone()),
            signer,
            recv_window,
        }
    }

    pub const fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// Full account snapshot
    #[instrument(skip(self), fields(exchange = "aster"))]
    pub async fn get_account_info(
        &self,
        recv_window: Option<u64>,
    ) -> Result<AsterAccountInfo, ExchangeError> {
        let signed = self
            .signer
            .sign(&QueryParams::new(), recv_window.unwrap_or(self.recv_window))
            .await?;

        self.rest
            .get_account(&signed, &self.signer.auth_headers())
            .await
            .map_err(ExchangeError::into_auth_failure)
    }

    /// Place an order; the signed string is posted as the body
    #[instrument(skip(self, request), fields(exchange = "aster", symbol = %request.symbol, side = %request.side, order_type = %request.order_type))]
    pub async fn new_order(
        &self,
        request: &AsterOrderRequest,
    ) -> Result<OrderResponse, ExchangeError> {
        let recv_window = request.recv_window.unwrap_or(self.recv_window);
        let signed = self.signer.sign(&request.to_params(), recv_window).await?;

        let order = self
            .rest
            .place_order(&signed, &self.signer.auth_headers())
            .await?;
        debug!(order_id = order.order_id, status = ?order.status, "Order accepted");
        Ok(order)
    }

    pub async fn market_buy(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResponse, ExchangeError> {
        self.new_order(&AsterOrderRequest::market(symbol, OrderSide::Buy, quantity))
            .await
    }

    pub async fn market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResponse, ExchangeError> {
        self.new_order(&AsterOrderRequest::market(symbol, OrderSide::Sell, quantity))
            .await
    }

    /// Balance of one asset, matched case-insensitively; `Ok(None)` when absent
    pub async fn get_balance(
        &self,
        asset: &str,
        recv_window: Option<u64>,
    ) -> Result<Option<Balance>, ExchangeError> {
        let account = self.get_account_info(recv_window).await?;
        Ok(account.balance(asset).cloned())
    }

    /// Query an order by `order_id` and/or `orig_client_order_id`
    #[instrument(skip(self, query), fields(exchange = "aster", symbol = %query.symbol))]
    pub async fn query_order(
        &self,
        query: &AsterOrderQuery,
    ) -> Result<OrderResponse, ExchangeError> {
        if query.order_id.is_none() && query.orig_client_order_id.is_none() {
            return Err(ExchangeError::InvalidParameters(
                "Either orderId or origClientOrderId must be provided".to_string(),
            ));
        }

        let recv_window = query.recv_window.unwrap_or(self.recv_window);
        let signed = self.signer.sign(&query.to_params(), recv_window).await?;

        self.rest
            .get_order(&signed, &self.signer.auth_headers())
            .await
            .map_err(ExchangeError::into_auth_failure)
    }
}
