pub mod aster;
pub mod binance_perp;
