use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HmacSigner, LocalClock, ReqwestRest, RequestSigner, RestClientBuilder, RestClientConfig,
};
use crate::exchanges::binance_perp::connector::{
    Account, BinancePerpConnector, MarketData, Trading,
};
use std::sync::Arc;

/// USDⓈ-M futures production endpoint
pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

/// Create a Binance Perpetual connector with REST-only support
pub fn build_connector(
    config: &ExchangeConfig,
) -> Result<BinancePerpConnector<ReqwestRest>, ExchangeError> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let rest_config = RestClientConfig::new(base_url, "binance_perp".to_string()).with_timeout(30);
    let rest = RestClientBuilder::new(rest_config).build()?;

    // Binance timestamps come from the local clock; no server round trip per request
    let (trading, account) = match (config.api_key(), config.secret_key()) {
        (Some(api_key), Some(secret_key)) if config.has_credentials() => {
            let signer = Arc::new(RequestSigner::new(
                HmacSigner::new(api_key.to_string(), secret_key.to_string()),
                LocalClock,
            ));
            (
                Some(Trading::new(&rest, signer.clone(), config.recv_window)),
                Some(Account::new(&rest, signer, config.recv_window)),
            )
        }
        _ => (None, None),
    };

    Ok(BinancePerpConnector {
        market: MarketData::new(&rest),
        trading,
        account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_connector() {
        let connector = build_connector(&ExchangeConfig::read_only()).unwrap();
        assert!(!connector.is_authenticated());
        assert!(connector.account.is_none());
    }

    #[test]
    fn test_credentials_enable_trading() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string());
        let connector = build_connector(&config).unwrap();
        assert!(connector.is_authenticated());
        assert!(connector.account.is_some());
    }
}
