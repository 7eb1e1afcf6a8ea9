use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order acknowledgment from POST /fapi/v1/order
///
/// Numeric amounts arrive as strings and stay that way; parse on demand.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: u64,

    pub symbol: String,

    #[serde(rename = "clientOrderId")]
    pub client_order_id: String,

    pub price: String,

    #[serde(rename = "avgPrice", default)]
    pub avg_price: Option<String>,

    #[serde(rename = "origQty")]
    pub orig_qty: String,

    #[serde(rename = "executedQty")]
    pub executed_qty: String,

    pub status: String,  // "NEW", "FILLED", etc.

    #[serde(rename = "timeInForce")]
    pub time_in_force: String,

    #[serde(rename = "type")]
    pub order_type: String,

    #[serde(rename = "reduceOnly", default)]
    pub reduce_only: bool,

    pub side: String,  // "BUY" or "SELL"

    #[serde(rename = "updateTime")]
    pub update_time: u64,
}

impl OrderResponse {
    /// Parse the executed quantity into a Decimal
    pub fn filled_qty(&self) -> Option<Decimal> {
        self.executed_qty.parse::<Decimal>().ok()
    }
}

/// One asset row from GET /fapi/v2/balance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetBalance {
    #[serde(rename = "accountAlias")]
    pub account_alias: String,

    pub asset: String,

    pub balance: String,

    #[serde(rename = "crossWalletBalance")]
    pub cross_wallet_balance: String,

    #[serde(rename = "crossUnPnl")]
    pub cross_un_pnl: String,

    #[serde(rename = "availableBalance")]
    pub available_balance: String,

    #[serde(rename = "maxWithdrawAmount")]
    pub max_withdraw_amount: String,

    #[serde(rename = "updateTime")]
    pub update_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_order_response() {
        let json = r#"{
            "orderId": 325078477,
            "symbol": "BTCUSDT",
            "status": "FILLED",
            "clientOrderId": "testOrder",
            "price": "0",
            "avgPrice": "43201.10000",
            "origQty": "0.002",
            "executedQty": "0.002",
            "timeInForce": "GTC",
            "type": "MARKET",
            "reduceOnly": false,
            "side": "BUY",
            "updateTime": 1573346959598
        }"#;

        let ack: OrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(ack.order_id, 325078477);
        assert_eq!(ack.symbol, "BTCUSDT");
        assert_eq!(ack.order_type, "MARKET");
        assert_eq!(ack.filled_qty(), Some(dec!(0.002)));
    }

    #[test]
    fn test_parse_order_response_without_optional_fields() {
        // Some gateway versions omit avgPrice/reduceOnly
        let json = r#"{
            "orderId": 1,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x",
            "price": "43000",
            "origQty": "0.001",
            "executedQty": "0",
            "timeInForce": "IOC",
            "type": "LIMIT",
            "side": "SELL",
            "updateTime": 1573346959598
        }"#;

        let ack: OrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(ack.avg_price, None);
        assert!(!ack.reduce_only);
        assert_eq!(ack.time_in_force, "IOC");
    }

    #[test]
    fn test_parse_balance_list() {
        let json = r#"[{
            "accountAlias": "SgsR",
            "asset": "USDT",
            "balance": "122607.35137903",
            "crossWalletBalance": "23.72469206",
            "crossUnPnl": "0.00000000",
            "availableBalance": "23.72469206",
            "maxWithdrawAmount": "23.72469206",
            "updateTime": 1617939110373
        }]"#;

        let balances: Vec<AssetBalance> = serde_json::from_str(json).unwrap();
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].asset, "USDT");
        assert_eq!(balances[0].available_balance, "23.72469206");
    }
}
