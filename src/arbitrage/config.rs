//! Loop parameters, read from `ARB_*` environment variables.

use crate::core::config::ConfigError;
use crate::exchanges::aster::DEFAULT_DEPTH_LIMIT;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrageConfig {
    /// Aster spot symbol, e.g. `4USDT`
    pub symbol: String,
    /// Symbol of the hedge leg on the counter-exchange
    pub counter_symbol: String,
    /// Depth levels requested from both venues
    pub depth_limit: u32,
    /// Base quantity of every market order
    pub order_amount: Decimal,
    /// Buy on Aster when `counter bid / aster ask` exceeds this
    pub buy_threshold: Decimal,
    /// Sell on Aster when `aster bid / counter ask` exceeds this
    pub sell_threshold: Decimal,
    pub loop_delay: Duration,
    pub journal_dir: PathBuf,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            symbol: "4USDT".to_string(),
            counter_symbol: "4USDT".to_string(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            order_amount: Decimal::new(1000, 0),
            buy_threshold: Decimal::new(101, 2),   // 1.01
            sell_threshold: Decimal::new(996, 3),  // 0.996
            loop_delay: Duration::from_millis(200),
            journal_dir: PathBuf::from("logs"),
        }
    }
}

impl ArbitrageConfig {
    /// Overlay `ARB_SYMBOL`, `ARB_COUNTER_SYMBOL`, `ARB_DEPTH_LIMIT`,
    /// `ARB_ORDER_AMOUNT`, `ARB_BUY_THRESHOLD`, `ARB_SELL_THRESHOLD`,
    /// `ARB_LOOP_DELAY_MS` and `ARB_JOURNAL_DIR` on the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let symbol = read("ARB_SYMBOL").unwrap_or(defaults.symbol);
        // the hedge leg follows the Aster symbol unless set explicitly
        let counter_symbol = read("ARB_COUNTER_SYMBOL").unwrap_or_else(|| symbol.clone());

        Ok(Self {
            counter_symbol,
            symbol,
            depth_limit: parse("ARB_DEPTH_LIMIT")?.unwrap_or(defaults.depth_limit),
            order_amount: parse("ARB_ORDER_AMOUNT")?.unwrap_or(defaults.order_amount),
            buy_threshold: parse("ARB_BUY_THRESHOLD")?.unwrap_or(defaults.buy_threshold),
            sell_threshold: parse("ARB_SELL_THRESHOLD")?.unwrap_or(defaults.sell_threshold),
            loop_delay: parse::<u64>("ARB_LOOP_DELAY_MS")?
                .map_or(defaults.loop_delay, Duration::from_millis),
            journal_dir: read("ARB_JOURNAL_DIR").map_or(defaults.journal_dir, PathBuf::from),
        })
    }

    /// Asset bought and sold on Aster: the symbol without its `USDT` quote.
    pub fn base_asset(&self) -> &str {
        self.symbol.strip_suffix("USDT").unwrap_or(&self.symbol)
    }
}

fn read(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    read(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} = {:?}: {}", key, raw, e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArbitrageConfig::default();
        assert_eq!(config.symbol, "4USDT");
        assert_eq!(config.buy_threshold.to_string(), "1.01");
        assert_eq!(config.sell_threshold.to_string(), "0.996");
        assert_eq!(config.depth_limit, DEFAULT_DEPTH_LIMIT);
        assert_eq!(config.order_amount, Decimal::from(1000));
        assert_eq!(config.loop_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_base_asset_strips_quote() {
        assert_eq!(ArbitrageConfig::default().base_asset(), "4");

        let config = ArbitrageConfig {
            symbol: "ASTERBTC".to_string(),
            ..ArbitrageConfig::default()
        };
        assert_eq!(config.base_asset(), "ASTERBTC");
    }

    // Single test touching the process environment so parallel tests never race on it
    #[test]
    fn test_from_env_overrides_and_rejects_garbage() {
        env::set_var("ARB_SYMBOL", "ASTERUSDT");
        env::set_var("ARB_BUY_THRESHOLD", "1.02");
        env::set_var("ARB_LOOP_DELAY_MS", "50");
        env::remove_var("ARB_COUNTER_SYMBOL");

        let config = ArbitrageConfig::from_env().unwrap();
        assert_eq!(config.symbol, "ASTERUSDT");
        assert_eq!(config.counter_symbol, "ASTERUSDT");
        assert_eq!(config.buy_threshold.to_string(), "1.02");
        assert_eq!(config.loop_delay, Duration::from_millis(50));
        assert_eq!(config.depth_limit, 10);

        env::set_var("ARB_DEPTH_LIMIT", "ten");
        let result = ArbitrageConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidConfiguration(_))));

        for key in [
            "ARB_SYMBOL",
            "ARB_BUY_THRESHOLD",
            "ARB_LOOP_DELAY_MS",
            "ARB_DEPTH_LIMIT",
        ] {
            env::remove_var(key);
        }
    }
}
