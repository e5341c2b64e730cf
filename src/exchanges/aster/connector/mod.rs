use crate::core::config::{ConfigUpdate, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::ReqwestRest;
use crate::core::traits::SpotExchange;
use crate::core::types::{Balance, OrderBook, OrderResponse, OrderSide};
use crate::exchanges::aster::builder::build_clients;
use crate::exchanges::aster::types::{AsterOrderQuery, AsterOrderRequest};
use crate::exchanges::aster::DEFAULT_BASE_URL;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

pub mod market_data;
pub mod trading;

pub use market_data::{MarketData, DEFAULT_DEPTH_LIMIT};
pub use trading::Trading;

/// Aster spot connector that composes market data and trading
///
/// The configuration is an immutable value: every mutation builds a new
/// configuration and fresh clients, and only swaps them in when the build
/// succeeds.
#[derive(Debug)]
pub struct AsterConnector {
    config: ExchangeConfig,
    market: MarketData<ReqwestRest>,
    trading: Option<Trading<ReqwestRest>>,
}

impl AsterConnector {
    pub fn new(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let config = with_default_base_url(config);
        let (market, trading) = build_clients(&config)?;
        Ok(Self {
            config,
            market,
            trading,
        })
    }

    /// A copy of the current configuration
    pub fn config(&self) -> ExchangeConfig {
        self.config.clone()
    }

    pub const fn market(&self) -> &MarketData<ReqwestRest> {
        &self.market
    }

    /// `None` until credentials are configured
    pub const fn trading(&self) -> Option<&Trading<ReqwestRest>> {
        self.trading.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.has_credentials()
    }

    pub fn set_api_keys(
        &mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<(), ExchangeError> {
        self.update_config(ConfigUpdate::new().api_key(api_key).secret_key(secret_key))
    }

    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<(), ExchangeError> {
        let config = with_default_base_url(self.config.merged(update));
        let (market, trading) = build_clients(&config)?;

        info!(
            exchange = "aster",
            base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            authenticated = trading.is_some(),
            "Rebuilt clients"
        );

        self.config = config;
        self.market = market;
        self.trading = trading;
        Ok(())
    }

    fn require_trading(&self) -> Result<&Trading<ReqwestRest>, ExchangeError> {
        self.trading
            .as_ref()
            .ok_or(ExchangeError::AuthenticationRequired)
    }
}

fn with_default_base_url(config: ExchangeConfig) -> ExchangeConfig {
    if config.base_url.is_some() {
        config
    } else {
        config.base_url(DEFAULT_BASE_URL.to_string())
    }
}

#[async_trait]
impl SpotExchange for AsterConnector {
    async fn get_depth(&self, symbol: &str, limit: u32) -> Result<OrderBook, ExchangeError> {
        self.market.get_depth(symbol, limit).await
    }

    async fn market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<OrderResponse, ExchangeError> {
        self.require_trading()?
            .new_order(&AsterOrderRequest::market(symbol, side, quantity))
            .await
    }

    async fn order_status(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> Result<OrderResponse, ExchangeError> {
        self.require_trading()?
            .query_order(&AsterOrderQuery::by_order_id(symbol, order_id))
            .await
    }

    async fn balance(&self, asset: &str) -> Result<Option<Balance>, ExchangeError> {
        self.require_trading()?.get_balance(asset, None).await
    }
}
