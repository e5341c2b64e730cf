use crate::core::kernel::QueryParams;
use crate::core::types::{OrderSide, OrderType, PositionSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of `GET /fapi/v2/positionRisk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinancePerpPosition {
    pub symbol: String,
    #[serde(rename = "positionAmt")]
    pub position_amt: Decimal,
    pub entry_price: Decimal,
    #[serde(rename = "unRealizedProfit", alias = "unRealizedPnl", default)]
    pub un_realized_profit: Decimal,
    #[serde(default)]
    pub leverage: Decimal,
    /// `BOTH` in one-way mode, `LONG`/`SHORT` in hedge mode
    #[serde(default)]
    pub position_side: Option<PositionSide>,
}

/// Market order on the futures venue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinancePerpOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub new_client_order_id: Option<String>,
}

impl BinancePerpOrderRequest {
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            new_client_order_id: None,
        }
    }

    pub fn client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(client_order_id.into());
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("symbol", self.symbol.to_uppercase())
            .push("side", self.side.as_str())
            .push("type", self.order_type.as_str())
            .push("quantity", self.quantity)
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref());
        params
    }
}
