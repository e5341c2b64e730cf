use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HmacSigner, ReqwestRest, RequestSigner, RestClientBuilder, RestClientConfig,
};
use crate::exchanges::aster::connector::{AsterConnector, MarketData, Trading};
use crate::exchanges::aster::DEFAULT_BASE_URL;

/// Market and (optional) trading clients sharing one HTTP client
pub(crate) type AsterClients = (MarketData<ReqwestRest>, Option<Trading<ReqwestRest>>);

/// Build the clients for a configuration. The trading client is only created
/// when both keys are present and non-empty.
pub(crate) fn build_clients(config: &ExchangeConfig) -> Result<AsterClients, ExchangeError> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let rest = RestClientBuilder::new(RestClientConfig::new(base_url, "aster".to_string()))
        .build()?;
    let market = MarketData::new(&rest);

    let trading = match (config.api_key(), config.secret_key()) {
        (Some(api_key), Some(secret_key)) if config.has_credentials() => {
            let signer = RequestSigner::new(
                HmacSigner::new(api_key.to_string(), secret_key.to_string()),
                market.clone(),
            );
            Some(Trading::new(&rest, signer, config.recv_window))
        }
        _ => None,
    };

    Ok((market, trading))
}

/// Create an Aster connector; without credentials it is market-data only
pub fn build_connector(config: ExchangeConfig) -> Result<AsterConnector, ExchangeError> {
    AsterConnector::new(config)
}
