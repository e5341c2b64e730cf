use crate::core::types::{Position, PositionSide};
use crate::exchanges::binance_perp::types::BinancePerpPosition;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Convert Binance Perpetual position to core Position type
///
/// In one-way mode the side is reported as `BOTH`, so the direction is taken
/// from the sign of the position amount instead.
pub fn convert_binance_perp_position(binance_position: &BinancePerpPosition) -> Position {
    let position_side = match binance_position.position_side {
        Some(side @ (PositionSide::Long | PositionSide::Short)) => side,
        _ => match binance_position.position_amt.cmp(&Decimal::ZERO) {
            Ordering::Greater => PositionSide::Long,
            Ordering::Less => PositionSide::Short,
            Ordering::Equal => PositionSide::Both,
        },
    };

    Position {
        symbol: binance_position.symbol.clone(),
        position_side,
        entry_price: binance_position.entry_price,
        position_amount: binance_position.position_amt,
        unrealized_pnl: binance_position.un_realized_profit,
        leverage: binance_position.leverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount: i64, side: Option<PositionSide>) -> BinancePerpPosition {
        BinancePerpPosition {
            symbol: "4USDT".to_string(),
            position_amt: Decimal::from(amount),
            entry_price: Decimal::ONE,
            un_realized_profit: Decimal::ZERO,
            leverage: Decimal::from(3),
            position_side: side,
        }
    }

    #[test]
    fn test_one_way_mode_side_from_sign() {
        assert_eq!(
            convert_binance_perp_position(&raw(10, Some(PositionSide::Both))).position_side,
            PositionSide::Long
        );
        assert_eq!(
            convert_binance_perp_position(&raw(-10, None)).position_side,
            PositionSide::Short
        );
        assert_eq!(
            convert_binance_perp_position(&raw(0, Some(PositionSide::Both))).position_side,
            PositionSide::Both
        );
    }

    #[test]
    fn test_hedge_mode_side_kept() {
        let position = convert_binance_perp_position(&raw(0, Some(PositionSide::Short)));
        assert_eq!(position.position_side, PositionSide::Short);
        assert_eq!(position.leverage, Decimal::from(3));
    }
}
