use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExchangeError, Result};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force qualifier for LIMIT orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum TimeInForce {
    /// Good-Till-Cancel
    Gtc,
    /// Immediate-Or-Cancel
    Ioc,
    /// Fill-Or-Kill
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single order intent, before signing.
///
/// Invariant: MARKET orders never transmit `price` or `timeInForce`.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: TimeInForce,
    pub reduce_only: bool,
}

impl OrderRequest {
    /// Market order with default flags.
    pub fn market(symbol: &str, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
        }
    }

    /// Limit order with an explicit time-in-force.
    pub fn limit(
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force,
            reduce_only: false,
        }
    }

    /// Client-side checks that must pass before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(ExchangeError::InvalidRequest(
                "LIMIT orders require a price".to_string(),
            ));
        }
        Ok(())
    }

    /// Parameters in canonical transmit order: symbol, side, type, quantity,
    /// timeInForce (LIMIT only), reduceOnly, price (LIMIT only). The signer
    /// appends timestamp and signature after these.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
            ("quantity", self.quantity.to_string()),
        ];

        if self.order_type == OrderType::Limit {
            params.push(("timeInForce", self.time_in_force.as_str().to_string()));
        }

        params.push(("reduceOnly", self.reduce_only.to_string()));

        if self.order_type == OrderType::Limit {
            if let Some(price) = self.price {
                params.push(("price", price.to_string()));
            }
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_params_strip_price_and_tif() {
        let order = OrderRequest::market("btcusdt", Side::Buy, dec!(0.001));
        let params = order.to_params();

        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["symbol", "side", "type", "quantity", "reduceOnly"]);

        // Symbol normalized to uppercase
        assert_eq!(params[0].1, "BTCUSDT");
        assert_eq!(params[4].1, "false");
    }

    #[test]
    fn test_limit_params_order() {
        let order = OrderRequest::limit("ETHUSDT", Side::Sell, dec!(1.5), dec!(2000), TimeInForce::Ioc);
        let params = order.to_params();

        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["symbol", "side", "type", "quantity", "timeInForce", "reduceOnly", "price"]
        );
        assert_eq!(params[4].1, "IOC");
        assert_eq!(params[6].1, "2000");
    }

    #[test]
    fn test_limit_without_price_is_invalid() {
        let order = OrderRequest {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            quantity: dec!(1),
            price: None,
            time_in_force: TimeInForce::Gtc,
            reduce_only: false,
        };

        match order.validate() {
            Err(ExchangeError::InvalidRequest(msg)) => assert!(msg.contains("price")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_side_round_trip() {
        assert_eq!(Side::Buy.as_str(), "BUY");
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}
