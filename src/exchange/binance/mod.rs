pub mod auth;
pub mod rest;
pub mod types;

pub use rest::FuturesRestClient;
pub use types::{AssetBalance, OrderResponse};
