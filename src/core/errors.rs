use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// No response was received from the exchange.
    #[error("Network error {code}: {message}")]
    NetworkError { code: String, message: String },

    /// The exchange (or a proxy in front of it) answered with an HTML page instead of JSON.
    #[error("Server error: {status} from {url} - server returned HTML error page instead of JSON")]
    NonApiResponse { status: u16, url: String },

    #[error(
        "API error {}: {message} ({status} from {url})",
        .code.map_or_else(|| "UNKNOWN".to_string(), |c| c.to_string())
    )]
    ApiError {
        status: u16,
        code: Option<i64>,
        message: String,
        url: String,
    },

    #[error("Authentication failed - likely timestamp synchronization issue: {source}")]
    AuthenticationFailed {
        #[source]
        source: Box<ExchangeError>,
    },

    #[error("Authentication required: no API credentials configured")]
    AuthenticationRequired,

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Missing {side} price level on {venue}")]
    MissingPriceLevel { venue: String, side: &'static str },

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// Map a transport failure where no usable response came back.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "TIMEOUT"
        } else if err.is_connect() {
            "CONNECT"
        } else if err.is_request() {
            "REQUEST"
        } else if err.is_body() {
            "BODY"
        } else if err.is_decode() {
            "DECODE"
        } else if err.is_redirect() {
            "REDIRECT"
        } else if err.is_builder() {
            "BUILDER"
        } else {
            "UNKNOWN"
        };

        Self::NetworkError {
            code: code.to_string(),
            message: err.to_string(),
        }
    }

    /// Reinterpret an HTML error page on an authenticated endpoint as a
    /// rejected signature. Every other error passes through untouched.
    pub fn into_auth_failure(self) -> Self {
        match self {
            err @ Self::NonApiResponse { .. } => Self::AuthenticationFailed {
                source: Box::new(err),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_without_code() {
        let err = ExchangeError::ApiError {
            status: 502,
            code: None,
            message: "Bad Gateway".to_string(),
            url: "https://sapi.asterdex.com/api/v1/depth".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error UNKNOWN: Bad Gateway (502 from https://sapi.asterdex.com/api/v1/depth)"
        );
    }

    #[test]
    fn test_html_page_becomes_auth_failure() {
        let err = ExchangeError::NonApiResponse {
            status: 403,
            url: "https://sapi.asterdex.com/api/v1/account".to_string(),
        }
        .into_auth_failure();

        assert!(matches!(err, ExchangeError::AuthenticationFailed { .. }));
        assert!(err.to_string().contains("timestamp synchronization"));
    }

    #[test]
    fn test_api_error_is_not_reinterpreted() {
        let err = ExchangeError::ApiError {
            status: 400,
            code: Some(-1021),
            message: "Timestamp for this request is outside of the recvWindow.".to_string(),
            url: "https://sapi.asterdex.com/api/v1/order".to_string(),
        }
        .into_auth_failure();

        assert!(matches!(
            err,
            ExchangeError::ApiError {
                code: Some(-1021),
                ..
            }
        ));
    }
}
