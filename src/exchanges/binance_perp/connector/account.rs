use crate::core::{
    errors::ExchangeError,
    kernel::{LocalClock, QueryParams, RequestSigner, RestClient},
    types::Position,
};
use crate::exchanges::binance_perp::{
    conversions::convert_binance_perp_position, rest::BinancePerpRestClient,
};
use std::sync::Arc;
use tracing::instrument;

/// Account information implementation for Binance Perpetual
pub struct Account<R: RestClient> {
    rest: BinancePerpRestClient<R>,
    signer: Arc<RequestSigner<LocalClock>>,
    recv_window: u64,
}

impl<R: RestClient> Account<R> {
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

    /// Positions for the given symbols (all symbols when empty). Flat
    /// positions are kept so callers can report them.
    #[instrument(skip(self), fields(exchange = "binance_perp"))]
    pub async fn get_positions(&self, symbols: &[String]) -> Result<Vec<Position>, ExchangeError> {
        let mut params = QueryParams::new();
        if let [symbol] = symbols {
            params.push("symbol", symbol.to_uppercase());
        }

        let signed = self.signer.sign(&params, self.recv_window).await?;
        let positions = self
            .rest
            .get_positions(&signed, &self.signer.auth_headers())
            .await?;

        Ok(positions
            .iter()
            .filter(|position| {
                symbols.is_empty()
                    || symbols
                        .iter()
                        .any(|symbol| symbol.eq_ignore_ascii_case(&position.symbol))
            })
            .map(convert_binance_perp_position)
            .collect())
    }
}
