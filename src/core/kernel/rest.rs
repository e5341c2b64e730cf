use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests
///
/// Query strings and bodies are sent byte-for-byte as given, so a signed
/// payload reaches the exchange exactly as it was signed. Every failure is
/// normalized into [`ExchangeError`]; there is a single attempt per call.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query` - Pre-built query string without the leading `?` (may be empty)
    /// * `headers` - Extra request headers
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, ExchangeError>;

    /// Make a POST request with a form-encoded body and strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - Request body, sent unmodified
    /// * `headers` - Extra request headers
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            user_agent: "asterx/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn new(base_url: String, exchange_name: String) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(base_url, exchange_name)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.config.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.config.base_url, endpoint, query)
        }
    }

    #[instrument(skip(self, query, body, headers), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &str,
        body: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        let url = self.build_url(endpoint, query);
        let mut request = self.client.request(method, &url);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.to_owned());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(&e))?;

        trace!(status = %status, "Response body: {}", text);

        decode_response(&url, status, &text)
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        self.make_request(Method::GET, endpoint, query, None, headers)
            .await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        self.make_request(Method::POST, endpoint, "", Some(body), headers)
            .await
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: Option<i64>,
    msg: Option<String>,
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.trim_start().to_ascii_lowercase();
    lower.starts_with("<html") || lower.contains("<!doctype html")
}

/// Normalize a received response into a typed value or an [`ExchangeError`].
pub fn decode_response<T: DeserializeOwned>(
    url: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ExchangeError> {
    if looks_like_html(body) {
        return Err(ExchangeError::NonApiResponse {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON response: {}", e))
        });
    }

    let reason = || status.canonical_reason().unwrap_or("Unknown error").to_string();
    let (code, message) = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => (err.code, err.msg.unwrap_or_else(reason)),
        Err(_) => (None, reason()),
    };

    Err(ExchangeError::ApiError {
        status: status.as_u16(),
        code,
        message,
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ServerTime;

    const URL: &str = "https://sapi.asterdex.com/api/v1/time";

    #[test]
    fn test_decode_success() {
        let time: ServerTime =
            decode_response(URL, StatusCode::OK, r#"{"serverTime":1499827319559}"#).unwrap();
        assert_eq!(time.server_time, 1_499_827_319_559);
    }

    #[test]
    fn test_decode_html_error_page() {
        let body = "<!DOCTYPE html>\n<html><body>403 Forbidden</body></html>";
        let result: Result<ServerTime, _> = decode_response(URL, StatusCode::FORBIDDEN, body);

        match result {
            Err(ExchangeError::NonApiResponse { status, url }) => {
                assert_eq!(status, 403);
                assert_eq!(url, URL);
            }
            other => panic!("Expected NonApiResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_api_error() {
        let body = r#"{"code":-1121,"msg":"Invalid symbol."}"#;
        let result: Result<ServerTime, _> = decode_response(URL, StatusCode::BAD_REQUEST, body);

        match result {
            Err(ExchangeError::ApiError {
                status,
                code,
                message,
                ..
            }) => {
                assert_eq!(status, 400);
                assert_eq!(code, Some(-1121));
                assert_eq!(message, "Invalid symbol.");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_plain_text_error_uses_reason() {
        let result: Result<ServerTime, _> =
            decode_response(URL, StatusCode::BAD_GATEWAY, "upstream timed out");

        assert!(matches!(
            result,
            Err(ExchangeError::ApiError { code: None, ref message, .. }) if message == "Bad Gateway"
        ));
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let result: Result<ServerTime, _> = decode_response(URL, StatusCode::OK, "{}");
        assert!(matches!(
            result,
            Err(ExchangeError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_build_url() {
        let rest = ReqwestRest::new("https://sapi.asterdex.com".to_string(), "aster".to_string())
            .unwrap();
        assert_eq!(
            rest.build_url("/api/v1/depth", "symbol=BTCUSDT&limit=10"),
            "https://sapi.asterdex.com/api/v1/depth?symbol=BTCUSDT&limit=10"
        );
        assert_eq!(
            rest.build_url("/api/v1/time", ""),
            "https://sapi.asterdex.com/api/v1/time"
        );
    }
}
