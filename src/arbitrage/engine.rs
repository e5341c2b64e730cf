use crate::arbitrage::config::ArbitrageConfig;
use crate::arbitrage::journal::Journal;
use crate::core::errors::ExchangeError;
use crate::core::traits::{CounterExchange, SpotExchange};
use crate::core::types::{OrderBook, OrderResponse, OrderSide, OrderStatus, PriceLevel};
use rand::Rng;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const SPOT_VENUE: &str = "aster";
const COUNTER_VENUE: &str = "counter";

/// Which way the spot leg trades; the hedge always goes the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Buy on spot at its ask, sell the hedge at the counter bid
    Buy,
    /// Sell on spot at its bid, buy the hedge at the counter ask
    Sell,
}

impl Direction {
    pub const fn spot_side(self) -> OrderSide {
        match self {
            Self::Buy => OrderSide::Buy,
            Self::Sell => OrderSide::Sell,
        }
    }

    pub const fn hedge_side(self) -> OrderSide {
        match self {
            Self::Buy => OrderSide::Sell,
            Self::Sell => OrderSide::Buy,
        }
    }

    /// Prefix of hedge client order ids
    pub const fn strategy_prefix(self) -> &'static str {
        match self {
            Self::Buy => "AS_BUY",
            Self::Sell => "AS_SELL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        })
    }
}

/// What one direction did during an iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ratio at or below the threshold, nothing traded
    NoOpportunity { profit: Decimal },
    /// Spot order placed but not reported `FILLED`; no hedge
    Unfilled { order_id: u64, status: OrderStatus },
    /// Spot order filled and hedged on the counter-exchange
    Hedged {
        order_id: u64,
        hedge_order_id: u64,
        client_order_id: String,
    },
}

/// Per-direction results of one iteration. A failed direction never
/// prevents the other from running.
#[derive(Debug)]
pub struct IterationReport {
    pub buy: Result<Outcome, ExchangeError>,
    pub sell: Result<Outcome, ExchangeError>,
}

/// Cross-venue arbitrage loop between a spot venue and a hedge venue
pub struct ArbitrageEngine<S, C> {
    spot: Arc<S>,
    counter: Arc<C>,
    journal: Arc<dyn Journal>,
    config: ArbitrageConfig,
}

impl<S: SpotExchange, C: CounterExchange> ArbitrageEngine<S, C> {
    pub fn new(
        spot: Arc<S>,
        counter: Arc<C>,
        journal: Arc<dyn Journal>,
        config: ArbitrageConfig,
    ) -> Self {
        Self {
            spot,
            counter,
            journal,
            config,
        }
    }

    pub const fn config(&self) -> &ArbitrageConfig {
        &self.config
    }

    /// Poll forever. Iterations never overlap and are separated by the
    /// configured delay, whatever their result.
    pub async fn run(&self) {
        info!(
            symbol = %self.config.symbol,
            counter_symbol = %self.config.counter_symbol,
            buy_threshold = %self.config.buy_threshold,
            sell_threshold = %self.config.sell_threshold,
            "Arbitrage loop started"
        );

        loop {
            if let Err(e) = self.run_once().await {
                error!(error = %e, "Arbitrage iteration failed");
            }
            tokio::time::sleep(self.config.loop_delay).await;
        }
    }

    /// One iteration: fetch both books concurrently, then evaluate the buy
    /// direction followed by the sell direction on the same snapshot.
    #[instrument(skip(self), fields(symbol = %self.config.symbol))]
    pub async fn run_once(&self) -> Result<IterationReport, ExchangeError> {
        debug!("Fetching order books");
        let (spot_book, counter_book) = tokio::try_join!(
            self.spot
                .get_depth(&self.config.symbol, self.config.depth_limit),
            self.counter
                .fetch_order_book(&self.config.counter_symbol, self.config.depth_limit),
        )?;

        let buy = self
            .evaluate(Direction::Buy, &spot_book, &counter_book)
            .await;
        log_direction_error(Direction::Buy, &buy);

        let sell = self
            .evaluate(Direction::Sell, &spot_book, &counter_book)
            .await;
        log_direction_error(Direction::Sell, &sell);

        Ok(IterationReport { buy, sell })
    }

    async fn evaluate(
        &self,
        direction: Direction,
        spot_book: &OrderBook,
        counter_book: &OrderBook,
    ) -> Result<Outcome, ExchangeError> {
        let (spot_price, counter_price, profit) = match direction {
            Direction::Buy => {
                let spot_ask = level_price(spot_book.best_ask(), SPOT_VENUE, "ask")?;
                let counter_bid = level_price(counter_book.best_bid(), COUNTER_VENUE, "bid")?;
                (spot_ask, counter_bid, ratio(counter_bid, spot_ask)?)
            }
            Direction::Sell => {
                let spot_bid = level_price(spot_book.best_bid(), SPOT_VENUE, "bid")?;
                let counter_ask = level_price(counter_book.best_ask(), COUNTER_VENUE, "ask")?;
                (spot_bid, counter_ask, ratio(spot_bid, counter_ask)?)
            }
        };

        let threshold = match direction {
            Direction::Buy => self.config.buy_threshold,
            Direction::Sell => self.config.sell_threshold,
        };

        debug!(%direction, profit = %profit.round_dp(6), %threshold, "Checked opportunity");
        if profit <= threshold {
            return Ok(Outcome::NoOpportunity { profit });
        }

        let started = Instant::now();
        let opportunity = format!(
            "{} opportunity [profit rate: {}, counter price: {}, {} price: {}]",
            direction,
            profit.round_dp(6),
            counter_price,
            SPOT_VENUE,
            spot_price
        );
        info!("{}", opportunity);
        self.journal.record(&opportunity);

        let outcome = self.execute(direction).await?;

        if let Outcome::Hedged { .. } = outcome {
            let elapsed = started.elapsed();
            let done = format!(
                "{} arbitrage complete, took {}ms",
                direction,
                elapsed.as_millis()
            );
            info!("{}", done);
            self.journal.record(&done);
            self.log_account_status().await;
        }

        Ok(outcome)
    }

    /// Spot market order, fill check, then the hedge. Every way this can
    /// end after the opportunity was journaled is journaled too.
    async fn execute(&self, direction: Direction) -> Result<Outcome, ExchangeError> {
        let symbol = &self.config.symbol;
        let amount = self.config.order_amount;

        let filled = match self.place_spot_order(direction).await {
            Ok(filled) => filled,
            Err(e) => {
                self.journal.record(&format!("{} spot order failed: {}", direction, e));
                return Err(e);
            }
        };
        info!(
            %direction,
            order_id = filled.order_id,
            status = ?filled.status,
            executed_qty = %filled.executed_qty,
            "Spot order result"
        );

        if !filled.is_filled() {
            let skipped = format!(
                "{} spot order {} not filled (status {:?}), hedge skipped",
                direction, filled.order_id, filled.status
            );
            warn!("{}", skipped);
            self.journal.record(&skipped);
            return Ok(Outcome::Unfilled {
                order_id: filled.order_id,
                status: filled.status,
            });
        }

        let client_order_id = generate_client_order_id(direction.strategy_prefix());
        let hedge = self
            .counter
            .create_market_order(
                &self.config.counter_symbol,
                direction.hedge_side(),
                amount,
                &client_order_id,
            )
            .await;

        match hedge {
            Ok(hedge) => Ok(Outcome::Hedged {
                order_id: filled.order_id,
                hedge_order_id: hedge.order_id,
                client_order_id,
            }),
            Err(e) => {
                let unhedged = format!(
                    "{} hedge {} failed, spot order {} on {} is unhedged: {}",
                    direction, client_order_id, filled.order_id, symbol, e
                );
                error!("{}", unhedged);
                self.journal.record(&unhedged);
                Err(e)
            }
        }
    }

    async fn place_spot_order(
        &self,
        direction: Direction,
    ) -> Result<OrderResponse, ExchangeError> {
        let symbol = &self.config.symbol;
        let order = self
            .spot
            .market_order(symbol, direction.spot_side(), self.config.order_amount)
            .await?;
        self.spot.order_status(symbol, order.order_id).await
    }

    /// Best effort: failures are logged and never fail the trade
    async fn log_account_status(&self) {
        let asset = self.config.base_asset();
        match self.spot.balance(asset).await {
            Ok(Some(balance)) => info!(
                asset = %balance.asset,
                free = %balance.free,
                locked = %balance.locked,
                "Spot balance"
            ),
            Ok(None) => info!(asset, "Spot balance: none held"),
            Err(e) => warn!(asset, error = %e, "Failed to fetch spot balance"),
        }

        let symbols = [self.config.counter_symbol.clone()];
        match self.counter.fetch_positions(&symbols).await {
            Ok(positions) => match positions.first() {
                Some(position) => info!(
                    symbol = %position.symbol,
                    side = ?position.position_side,
                    amount = %position.position_amount,
                    entry_price = %position.entry_price,
                    unrealized_pnl = %position.unrealized_pnl,
                    "Counter position"
                ),
                None => info!(symbol = %self.config.counter_symbol, "Counter position: flat"),
            },
            Err(e) => warn!(error = %e, "Failed to fetch counter positions"),
        }
    }
}

fn log_direction_error(direction: Direction, result: &Result<Outcome, ExchangeError>) {
    match result {
        Err(e @ ExchangeError::MissingPriceLevel { .. }) => {
            debug!(%direction, reason = %e, "Skipped direction");
        }
        Err(e) => error!(%direction, error = %e, "Arbitrage direction failed"),
        Ok(_) => {}
    }
}

/// Top-of-book price; an absent or zero level is unusable
fn level_price(
    level: Option<&PriceLevel>,
    venue: &str,
    side: &'static str,
) -> Result<Decimal, ExchangeError> {
    level
        .map(PriceLevel::price)
        .filter(|price| !price.is_zero())
        .ok_or_else(|| ExchangeError::MissingPriceLevel {
            venue: venue.to_string(),
            side,
        })
}

/// Denominators come from `level_price` and are never zero, so a `None`
/// from `checked_div` here means Decimal overflow.
fn ratio(numerator: Decimal, denominator: Decimal) -> Result<Decimal, ExchangeError> {
    numerator.checked_div(denominator).ok_or_else(|| {
        ExchangeError::Other(format!("price ratio {} / {} overflows", numerator, denominator))
    })
}

/// `<PREFIX>_<unix millis>_<9 random base36 chars>`, upper-cased
pub fn generate_client_order_id(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();

    format!("{}_{}_{}", prefix, millis, suffix).to_uppercase()
}
