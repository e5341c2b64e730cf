use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every authenticated call.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Source of the timestamp embedded in signed requests.
///
/// Implementations are queried once per signature and must not cache.
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    async fn now_millis(&self) -> Result<u64, ExchangeError>;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

#[async_trait]
impl TimeSource for LocalClock {
    async fn now_millis(&self) -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_millis() as u64)
            .map_err(|e| ExchangeError::Other(format!("System time error: {}", e)))
    }
}

/// Clock pinned to a single instant, for deterministic signatures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

#[async_trait]
impl TimeSource for FixedClock {
    async fn now_millis(&self) -> Result<u64, ExchangeError> {
        Ok(self.0)
    }
}

/// Ordered request parameters.
///
/// The signature covers the literal `key=value&...` string, so iteration
/// order is insertion order and must match the bytes sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Push only when a value is present; absent fields never reach the signer.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A fully signed query string, sent unmodified as URL query or request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery(String);

impl SignedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// HMAC-SHA256 key material.
#[derive(Clone)]
pub struct HmacSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner").finish_non_exhaustive()
    }
}

impl HmacSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Lowercase hex HMAC-SHA256 of `payload`.
    pub fn signature(&self, payload: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Signs parameter lists with a timestamp taken from a [`TimeSource`].
pub struct RequestSigner<T: TimeSource> {
    hmac: HmacSigner,
    clock: T,
}

impl<T: TimeSource> fmt::Debug for RequestSigner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}

impl<T: TimeSource> RequestSigner<T> {
    pub fn new(hmac: HmacSigner, clock: T) -> Self {
        Self { hmac, clock }
    }

    /// Headers to attach to a signed request.
    pub fn auth_headers(&self) -> [(&'static str, &str); 1] {
        [(API_KEY_HEADER, self.hmac.api_key())]
    }

    /// Build `params&recvWindow=<n>&timestamp=<t>&signature=<hex>`.
    ///
    /// Fails without a fallback if the time source fails.
    pub async fn sign(
        &self,
        params: &QueryParams,
        recv_window: u64,
    ) -> Result<SignedQuery, ExchangeError> {
        let timestamp = self.clock.now_millis().await?;
        self.sign_at(params, recv_window, timestamp)
    }

    fn sign_at(
        &self,
        params: &QueryParams,
        recv_window: u64,
        timestamp: u64,
    ) -> Result<SignedQuery, ExchangeError> {
        let mut payload = params.to_query_string();
        if !payload.is_empty() {
            payload.push('&');
        }
        payload.push_str(&format!(
            "recvWindow={}&timestamp={}",
            recv_window, timestamp
        ));

        let signature = self.hmac.signature(&payload)?;
        payload.push_str("&signature=");
        payload.push_str(&signature);

        Ok(SignedQuery(payload))
    }
}
