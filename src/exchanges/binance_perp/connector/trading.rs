use crate::core::{
    errors::ExchangeError,
    kernel::{LocalClock, RequestSigner, RestClient},
    types::OrderResponse,
};
use crate::exchanges::binance_perp::{rest::BinancePerpRestClient, types::BinancePerpOrderRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Trading implementation for Binance Perpetual
pub struct Trading<R: RestClient> {
    rest: BinancePerpRestClient<R>,
    signer: Arc<RequestSigner<LocalClock>>,
    recv_window: u64,
}

impl<R: RestClient> Trading<R> {
    pub fn new(rest: &R, signer: Arc<RequestSigner<LocalClock>>, recv_window: u64) -> Self
    where
        R: Clone,
    {
        Self {
            rest: BinancePerpRestClient::new(rest.clone()),
            signer,
            recv_window,
        }
    }

    #[instrument(skip(self, order), fields(exchange = "binance_perp", symbol = %order.symbol, side = %order.side))]
    pub async fn place_order(
        &self,
        order: &BinancePerpOrderRequest,
    ) -> Result<OrderResponse, ExchangeError> {
        let signed = self
            .signer
            .sign(&order.to_params(), self.recv_window)
            .await?;

        let response = self
            .rest
            .place_order(&signed, &self.signer.auth_headers())
            .await?;
        debug!(
            order_id = response.order_id,
            client_order_id = %response.client_order_id,
            status = ?response.status,
            "Order accepted"
        );
        Ok(response)
    }
}
