use crate::data::{OrderRequest, Side, TimeInForce};
use crate::error::{ExchangeError, Result};
use crate::exchange::binance::{auth, types::{AssetBalance, OrderResponse}};
use reqwest::{Client, Method};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

/// Binance Futures REST API client
///
/// All authenticated calls carry their parameters in the query string,
/// signed per [`auth::signed_query`], with the API key in the
/// `X-MBX-APIKEY` header. The secret never leaves the process.
pub struct FuturesRestClient {
    http: Client,
    api_key: String,
    secret_key: String,
    base_url: String,
}

impl FuturesRestClient {
    /// Create new REST client with a fixed 10 second per-call timeout
    pub fn new(api_key: String, secret_key: String, base_url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key,
            secret_key,
            base_url,
        }
    }

    /// Unauthenticated GET against a public endpoint
    pub async fn public_get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value> {
        let mut url = format!("{}{}", self.base_url, path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&auth::encode_query(params));
        }

        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;

        self.decode(response).await
    }

    /// Execute a signed request.
    ///
    /// Appends the millisecond timestamp, signs the canonical query string,
    /// and sends everything in the URL query - no request body, regardless
    /// of HTTP method. Only GET, POST and DELETE are valid here; anything
    /// else is rejected before any network I/O.
    pub async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        if method != Method::GET && method != Method::POST && method != Method::DELETE {
            return Err(ExchangeError::InvalidRequest(format!(
                "unsupported HTTP method: {}",
                method
            )));
        }

        let query = auth::signed_query(params, &self.secret_key);
        let url = format!("{}{}?{}", self.base_url, path, query);

        debug!("{} {} headers=[X-MBX-APIKEY]", method, url);

        let response = self
            .http
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        self.decode(response).await
    }

    /// Place an order. LIMIT orders are validated to carry a price before
    /// anything is signed or sent.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderResponse> {
        order.validate()?;

        let params = order.to_params();
        info!(
            "Placing {} {} order: {} qty={}",
            order.side, order.order_type, order.symbol, order.quantity
        );

        match self
            .signed_request::<OrderResponse>(Method::POST, "/fapi/v1/order", &params)
            .await
        {
            Ok(ack) => {
                info!(
                    "Order placed: id={} status={} executedQty={}",
                    ack.order_id, ack.status, ack.executed_qty
                );
                Ok(ack)
            }
            Err(e) => {
                error!("Error placing order: {}", e);
                Err(e)
            }
        }
    }

    /// Place a market order
    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> Result<OrderResponse> {
        self.place_order(&OrderRequest::market(symbol, side, quantity))
            .await
    }

    /// Place a limit order
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<OrderResponse> {
        self.place_order(&OrderRequest::limit(symbol, side, quantity, price, time_in_force))
            .await
    }

    /// Get account balances. The only transmitted parameters are the
    /// timestamp and the signature.
    pub async fn get_balances(&self) -> Result<Vec<AssetBalance>> {
        self.signed_request(Method::GET, "/fapi/v2/balance", &[])
            .await
    }

    /// Test connectivity to the exchange
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}/fapi/v1/ping", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ExchangeError::Api {
                status,
                body: response.text().await.unwrap_or_default(),
            })
        }
    }

    /// Read the response, tracing the full exchange at debug level. Non-2xx
    /// statuses become [`ExchangeError::Api`] with the body attached.
    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        debug!("RESP {} {}", status, body);

        if !status.is_success() {
            error!("HTTP error: {} - {}", status, body);
            return Err(ExchangeError::Api { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
