use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    Stop,
    TakeProfit,
    StopMarket,
    TakeProfitMarket,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::Stop => "STOP",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum TimeInForce {
    GTC, // Good Till Canceled
    IOC, // Immediate or Cancel
    FOK, // Fill or Kill
    GTX, // Post only
}

impl TimeInForce {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::IOC => "IOC",
            Self::FOK => "FOK",
            Self::GTX => "GTX",
        }
    }
}

/// One `[price, quantity]` level as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel(pub Decimal, pub Decimal);

impl PriceLevel {
    pub const fn price(&self) -> Decimal {
        self.0
    }

    pub const fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Depth snapshot. Bids are ordered best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,
    #[serde(rename = "E", default)]
    pub message_time: i64,
    #[serde(rename = "T", default)]
    pub engine_time: i64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: u64,
}

/// Order state as reported by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default)]
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub client_order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    #[serde(default)]
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub cum_quote: Decimal,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(rename = "type", default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub orig_type: Option<OrderType>,
    #[serde(default)]
    pub side: Option<OrderSide>,
}

impl OrderResponse {
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub position_side: PositionSide,
    pub entry_price: Decimal,
    pub position_amount: Decimal,
    pub unrealized_pnl: Decimal,
    pub leverage: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_order_book_from_depth_payload() {
        let json = r#"{
            "lastUpdateId": 1027024,
            "E": 1589436922972,
            "T": 1589436922959,
            "bids": [["4.00000000", "431.00000000"], ["3.99000000", "12.00000000"]],
            "asks": [["4.00000200", "12.00000000"]]
        }"#;

        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.last_update_id, 1_027_024);
        assert_eq!(book.message_time, 1_589_436_922_972);
        assert_eq!(book.engine_time, 1_589_436_922_959);
        assert_eq!(book.best_bid().map(PriceLevel::price), Some(dec("4.00000000")));
        assert_eq!(book.best_ask().map(PriceLevel::quantity), Some(dec("12")));
        // scale survives parsing
        assert_eq!(book.bids[0].price().to_string(), "4.00000000");
    }

    #[test]
    fn test_order_response_tolerates_sparse_payload() {
        let json = r#"{"orderId": 42, "status": "PARTIALLY_FILLED", "executedQty": "5.5"}"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();

        assert_eq!(order.order_id, 42);
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert_eq!(order.executed_qty, dec("5.5"));
        assert!(!order.is_filled());
        assert!(order.side.is_none());
    }

    #[test]
    fn test_order_enums_wire_names() {
        assert_eq!(OrderType::TakeProfitMarket.as_str(), "TAKE_PROFIT_MARKET");
        assert_eq!(
            serde_json::to_string(&OrderType::StopMarket).unwrap(),
            "\"STOP_MARKET\""
        );
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }
}
