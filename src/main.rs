use anyhow::Context;
use asterx::arbitrage::{ArbitrageConfig, ArbitrageEngine, DailyFileJournal};
use asterx::core::config::ExchangeConfig;
use asterx::exchanges::{aster, binance_perp};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "env-file")]
    asterx::core::config::load_env_auto().context("loading .env file")?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arbitrage = ArbitrageConfig::from_env().context("reading ARB_* settings")?;

    // both legs place orders, so both venues need credentials
    let aster_config = ExchangeConfig::from_env("ASTER").context("reading Aster credentials")?;
    let binance_config =
        ExchangeConfig::from_env("BINANCE").context("reading Binance credentials")?;

    let spot = aster::build_connector(aster_config).context("building Aster connector")?;
    let counter =
        binance_perp::build_connector(&binance_config).context("building Binance connector")?;
    let journal = DailyFileJournal::new(&arbitrage.journal_dir).context("opening journal")?;

    info!(
        journal_dir = %arbitrage.journal_dir.display(),
        order_amount = %arbitrage.order_amount,
        loop_delay_ms = arbitrage.loop_delay.as_millis() as u64,
        "Starting arbitrage"
    );

    let engine = ArbitrageEngine::new(
        Arc::new(spot),
        Arc::new(counter),
        Arc::new(journal),
        arbitrage,
    );
    engine.run().await;

    Ok(())
}
