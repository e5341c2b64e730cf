use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Default receive window in milliseconds.
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub api_key: Option<Secret<String>>,
    pub secret_key: Option<Secret<String>>,
    pub base_url: Option<String>,
    pub recv_window: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::read_only()
    }
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let redact = |key: &Option<Secret<String>>| key.as_ref().map(|_| "[REDACTED]");

        let mut state = serializer.serialize_struct("ExchangeConfig", 4)?;
        state.serialize_field("api_key", &redact(&self.api_key))?;
        state.serialize_field("secret_key", &redact(&self.secret_key))?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("recv_window", &self.recv_window)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            api_key: Option<String>,
            secret_key: Option<String>,
            base_url: Option<String>,
            recv_window: Option<u64>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: helper.api_key.map(Secret::new),
            secret_key: helper.secret_key.map(Secret::new),
            base_url: helper.base_url,
            recv_window: helper.recv_window.unwrap_or(DEFAULT_RECV_WINDOW),
        })
    }
}

/// Partial configuration applied on top of an existing [`ExchangeConfig`].
///
/// Every `Some` field replaces the current value; `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: Option<String>,
    pub recv_window: Option<u64>,
}

impl ConfigUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub const fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Some(Secret::new(api_key)),
            secret_key: Some(Secret::new(secret_key)),
            base_url: None,
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    /// Create configuration for read-only operations (market data only)
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            base_url: None,
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{EXCHANGE}_API_KEY` (e.g., `ASTER_API_KEY`)
    /// - `{EXCHANGE}_SECRET_KEY` (e.g., `ASTER_SECRET_KEY`), or
    ///   `{EXCHANGE}_API_SECRET` when that is unset
    /// - `{EXCHANGE}_BASE_URL` (optional)
    /// - `{EXCHANGE}_RECV_WINDOW` (optional, milliseconds)
    pub fn from_env(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let config = Self::from_env_optional(exchange_prefix)?;
        let prefix = exchange_prefix.to_uppercase();

        if config.api_key.is_none() {
            return Err(ConfigError::MissingEnvironmentVariable(format!(
                "{}_API_KEY",
                prefix
            )));
        }
        if config.secret_key.is_none() {
            return Err(ConfigError::MissingEnvironmentVariable(format!(
                "{}_SECRET_KEY",
                prefix
            )));
        }

        Ok(config)
    }

    /// Like [`ExchangeConfig::from_env`] but credentials may be absent,
    /// producing a read-only configuration.
    pub fn from_env_optional(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let prefix = exchange_prefix.to_uppercase();
        let read = |suffix: &str| {
            env::var(format!("{}_{}", prefix, suffix))
                .ok()
                .filter(|value| !value.is_empty())
        };

        let recv_window = match read("RECV_WINDOW") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!(
                    "{}_RECV_WINDOW must be milliseconds: {}",
                    prefix, e
                ))
            })?,
            None => DEFAULT_RECV_WINDOW,
        };

        Ok(Self {
            api_key: read("API_KEY").map(Secret::new),
            secret_key: read("SECRET_KEY")
                .or_else(|| read("API_SECRET"))
                .map(Secret::new),
            base_url: read("BASE_URL"),
            recv_window,
        })
    }

    /// Check if this configuration has valid credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        matches!(
            (&self.api_key, &self.secret_key),
            (Some(api), Some(secret))
                if !api.expose_secret().is_empty() && !secret.expose_secret().is_empty()
        )
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the default receive window in milliseconds
    #[must_use]
    pub const fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Apply a partial update, producing a new configuration value.
    #[must_use]
    pub fn merged(&self, update: ConfigUpdate) -> Self {
        Self {
            api_key: update.api_key.map(Secret::new).or_else(|| self.api_key.clone()),
            secret_key: update
                .secret_key
                .map(Secret::new)
                .or_else(|| self.secret_key.clone()),
            base_url: update.base_url.or_else(|| self.base_url.clone()),
            recv_window: update.recv_window.unwrap_or(self.recv_window),
        }
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
    }
}

#[cfg(feature = "env-file")]
pub fn load_env_auto() -> Result<(), ConfigError> {
    let env_files = [
        ".env.local".to_string(),
        format!(
            ".env.{}",
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
        ),
        ".env".to_string(),
    ];

    for env_file in &env_files {
        match dotenv::from_path(env_file) {
            Ok(()) => return Ok(()),
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file, e
                )));
            }
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_has_no_credentials() {
        let config = ExchangeConfig::read_only();
        assert!(!config.has_credentials());
        assert_eq!(config.recv_window, DEFAULT_RECV_WINDOW);
    }

    #[test]
    fn test_empty_key_is_not_a_credential() {
        let config = ExchangeConfig::new(String::new(), "secret".to_string());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_merged_keeps_unspecified_fields() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string())
            .base_url("https://sapi.asterdex.com".to_string());

        let merged = config.merged(ConfigUpdate::new().recv_window(10_000));

        assert_eq!(merged.recv_window, 10_000);
        assert_eq!(merged.api_key(), Some("key"));
        assert_eq!(merged.secret_key(), Some("secret"));
        assert_eq!(merged.base_url.as_deref(), Some("https://sapi.asterdex.com"));
    }

    #[test]
    fn test_api_secret_is_accepted_for_secret_key() {
        // unique prefix so parallel tests never share these variables
        env::set_var("ASTERX_CFG_ALIAS_API_KEY", "key");
        env::set_var("ASTERX_CFG_ALIAS_API_SECRET", "from_alias");
        let config = ExchangeConfig::from_env("asterx_cfg_alias").unwrap();
        assert_eq!(config.secret_key(), Some("from_alias"));

        env::set_var("ASTERX_CFG_ALIAS_SECRET_KEY", "primary");
        let config = ExchangeConfig::from_env("asterx_cfg_alias").unwrap();
        assert_eq!(config.secret_key(), Some("primary"));

        for suffix in ["API_KEY", "API_SECRET", "SECRET_KEY"] {
            env::remove_var(format!("ASTERX_CFG_ALIAS_{}", suffix));
        }
    }

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string());
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("\"key\""));
        assert!(!json.contains("secret\""));
    }
}
