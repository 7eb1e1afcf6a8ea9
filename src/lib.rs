pub mod data;
pub mod error;
pub mod exchange;
pub mod strategy;
pub mod utils;

// Re-export commonly used types
pub use data::{OrderRequest, OrderType, Side, TimeInForce};
pub use error::ExchangeError;
pub use exchange::{AssetBalance, FuturesRestClient, OrderResponse};
pub use strategy::{SliceOutcome, TwapExecutor, TwapPlan};
pub use utils::Config;
