pub mod types;

pub use types::{OrderRequest, OrderType, Side, TimeInForce};
