/// asterx Kernel - transport and signing layer shared by every venue
///
/// The kernel holds no exchange-specific endpoints. It provides:
///
/// ## Transport
/// - `RestClient`: typed GET/POST over pre-built query strings and bodies
/// - `ReqwestRest`: reqwest implementation that normalizes HTML error pages,
///   structured API errors and network failures into `ExchangeError`
///
/// ## Authentication
/// - `HmacSigner`: HMAC-SHA256 key material
/// - `RequestSigner`: builds `params&recvWindow=..&timestamp=..&signature=..`
/// - `TimeSource`: where the timestamp comes from (`LocalClock`, `FixedClock`,
///   or the exchange's own server time)
///
/// # Example
/// ```rust,no_run
/// use asterx::core::kernel::*;
///
/// # async fn example() -> Result<(), asterx::ExchangeError> {
/// let signer = RequestSigner::new(
///     HmacSigner::new("api_key".to_string(), "secret_key".to_string()),
///     LocalClock,
/// );
///
/// let mut params = QueryParams::new();
/// params.push("symbol", "BTCUSDT");
/// let signed = signer.sign(&params, 5000).await?;
///
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://fapi.binance.com".to_string(),
///     "binance_perp".to_string(),
/// ))
/// .build()?;
///
/// let positions: serde_json::Value = rest
///     .get_json("/fapi/v2/positionRisk", signed.as_str(), &signer.auth_headers())
///     .await?;
/// # let _ = positions;
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{decode_response, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{
    FixedClock, HmacSigner, LocalClock, QueryParams, RequestSigner, SignedQuery, TimeSource,
    API_KEY_HEADER,
};
