use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the exchange client.
///
/// Validation failures are reported before any network I/O happens, so a
/// rejected request never reaches the wire. HTTP-level rejections keep the
/// status and response body so callers can see the exchange's reason.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Malformed input caught client-side (missing LIMIT price,
    /// non-positive TWAP parameters, unsupported HTTP method).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response from the exchange.
    #[error("exchange returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure, including the per-call timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body that did not decode as the expected JSON shape.
    #[error("bad response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias using ExchangeError
pub type Result<T> = std::result::Result<T, ExchangeError>;
