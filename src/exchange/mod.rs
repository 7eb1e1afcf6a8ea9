pub mod binance;

pub use binance::{AssetBalance, FuturesRestClient, OrderResponse};
