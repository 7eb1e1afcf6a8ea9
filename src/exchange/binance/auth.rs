use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Generate HMAC-SHA256 signature for Binance API requests
///
/// Binance requires all authenticated endpoints to include:
/// 1. timestamp parameter
/// 2. signature parameter (HMAC-SHA256 of the query string, lowercase hex)
pub fn sign_payload(secret_key: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(payload.as_bytes());

    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Get current timestamp in milliseconds
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// URL-encode parameters, preserving the order given. Repeated keys are
/// emitted once per value.
pub fn encode_query(params: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Build a signed query string for the Binance API.
///
/// The signature covers the exact byte sequence sent as the query portion of
/// the request, so `timestamp` is appended before signing and `signature`
/// itself goes last. Any reordering on the wire would make the exchange
/// reject the request with an authentication error.
pub fn signed_query(params: &[(&str, String)], secret_key: &str) -> String {
    signed_query_at(params, secret_key, timestamp_ms())
}

fn signed_query_at(params: &[(&str, String)], secret_key: &str, timestamp: u64) -> String {
    let mut query = encode_query(params);
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(&format!("timestamp={}", timestamp));

    let signature = sign_payload(secret_key, &query);

    format!("{}&signature={}", query, signature)
}
