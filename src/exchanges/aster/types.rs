use crate::core::kernel::QueryParams;
use crate::core::types::{Balance, OrderSide, OrderType, TimeInForce};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsterAccountInfo {
    #[serde(default)]
    pub fee_tier: u32,
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub can_deposit: bool,
    #[serde(default)]
    pub can_withdraw: bool,
    #[serde(default)]
    pub can_burn_asset: bool,
    #[serde(default)]
    pub update_time: i64,
    pub balances: Vec<Balance>,
}

impl AsterAccountInfo {
    /// ASCII case-insensitive asset lookup; the returned entry keeps the exchange's casing.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|balance| balance.asset.eq_ignore_ascii_case(asset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsterOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub quote_order_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub stop_price: Option<Decimal>,
    /// Overrides the client's default receive window for this order only
    pub recv_window: Option<u64>,
}

impl AsterOrderRequest {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            time_in_force: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            new_client_order_id: None,
            stop_price: None,
            recv_window: None,
        }
    }

    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market).quantity(quantity)
    }

    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::Limit)
            .quantity(quantity)
            .price(price)
            .time_in_force(TimeInForce::GTC)
    }

    pub const fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub const fn quote_order_qty(mut self, quote_order_qty: Decimal) -> Self {
        self.quote_order_qty = Some(quote_order_qty);
        self
    }

    pub const fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub const fn stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub const fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(client_order_id.into());
        self
    }

    pub const fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    /// Wire parameters in signing order. Absent fields are left out and the
    /// receive window is appended later by the signer.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("symbol", self.symbol.to_uppercase())
            .push("side", self.side.as_str())
            .push("type", self.order_type.as_str())
            .push_opt("timeInForce", self.time_in_force.map(TimeInForce::as_str))
            .push_opt("quantity", self.quantity)
            .push_opt("quoteOrderQty", self.quote_order_qty)
            .push_opt("price", self.price)
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .push_opt("stopPrice", self.stop_price);
        params
    }
}

/// Identifies an order by exchange id, client id, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsterOrderQuery {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    pub recv_window: Option<u64>,
}

impl AsterOrderQuery {
    pub fn by_order_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            recv_window: None,
        }
    }

    pub fn by_client_order_id(
        symbol: impl Into<String>,
        client_order_id: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            recv_window: None,
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("symbol", self.symbol.to_uppercase())
            .push_opt("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_order_params() {
        let request = AsterOrderRequest::market("4usdt", OrderSide::Buy, Decimal::from(1000));
        assert_eq!(
            request.to_params().to_query_string(),
            "symbol=4USDT&side=BUY&type=MARKET&quantity=1000"
        );
    }

    #[test]
    fn test_limit_order_params_order() {
        let request = AsterOrderRequest::limit(
            "BTCUSDT",
            OrderSide::Sell,
            "0.01".parse().unwrap(),
            "65000.5".parse().unwrap(),
        )
        .client_order_id("my-order")
        .recv_window(10_000);

        assert_eq!(
            request.to_params().to_query_string(),
            "symbol=BTCUSDT&side=SELL&type=LIMIT&timeInForce=GTC&quantity=0.01&price=65000.5&newClientOrderId=my-order"
        );
    }

    #[test]
    fn test_order_query_params_with_both_ids() {
        let mut query = AsterOrderQuery::by_order_id("ethusdt", 7);
        query.orig_client_order_id = Some("abc".to_string());

        assert_eq!(
            query.to_params().to_query_string(),
            "symbol=ETHUSDT&orderId=7&origClientOrderId=abc"
        );
    }

    #[test]
    fn test_account_balance_lookup_keeps_case() {
        let account: AsterAccountInfo = serde_json::from_str(
            r#"{"feeTier":0,"canTrade":true,"balances":[
                {"asset":"USDT","free":"100.5","locked":"0"},
                {"asset":"Btc","free":"0.1","locked":"0.05"}
            ]}"#,
        )
        .unwrap();

        let balance = account.balance("bTC").unwrap();
        assert_eq!(balance.asset, "Btc");
        assert!(account.balance("ETH").is_none());
    }
}
