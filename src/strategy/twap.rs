use crate::data::{OrderType, Side};
use crate::error::{ExchangeError, Result};
use crate::exchange::binance::types::OrderResponse;
use crate::exchange::FuturesRestClient;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// One TWAP run: split `total_qty` into `slices` equal market orders spread
/// evenly over `duration_secs`. Computed once at invocation start, never
/// persisted.
#[derive(Debug, Clone)]
pub struct TwapPlan {
    pub symbol: String,
    pub side: Side,
    pub total_qty: Decimal,
    pub slices: u32,
    pub duration_secs: u64,
    pub order_type: OrderType,
}

impl TwapPlan {
    /// Plan with the default schedule: 5 slices over 30 seconds.
    pub fn new(symbol: &str, side: Side, total_qty: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            total_qty,
            slices: 5,
            duration_secs: 30,
            order_type: OrderType::Market,
        }
    }

    pub fn with_schedule(mut self, slices: u32, duration_secs: u64) -> Self {
        self.slices = slices;
        self.duration_secs = duration_secs;
        self
    }

    /// Checks that must pass before any order is placed.
    pub fn validate(&self) -> Result<()> {
        if self.slices == 0 {
            return Err(ExchangeError::InvalidRequest(
                "slices must be positive".to_string(),
            ));
        }
        if self.duration_secs == 0 {
            return Err(ExchangeError::InvalidRequest(
                "duration_secs must be positive".to_string(),
            ));
        }
        if self.order_type != OrderType::Market {
            return Err(ExchangeError::InvalidRequest(
                "TWAP currently supports only MARKET slices".to_string(),
            ));
        }
        Ok(())
    }

    /// Quantity of each slice
    pub fn slice_qty(&self) -> Decimal {
        self.total_qty / Decimal::from(self.slices)
    }

    /// Pause between consecutive slices
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs as f64 / f64::from(self.slices))
    }
}

/// Outcome of a single TWAP slice.
///
/// A failed slice is recorded here instead of aborting the run, so the
/// caller pattern-matches the returned list for partial failures.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SliceOutcome {
    Filled(OrderResponse),
    Failed { error: String },
}

impl SliceOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, SliceOutcome::Filled(_))
    }
}

/// Executes TWAP plans against the exchange, strictly one slice at a time.
pub struct TwapExecutor<'a> {
    client: &'a FuturesRestClient,
}

impl<'a> TwapExecutor<'a> {
    pub fn new(client: &'a FuturesRestClient) -> Self {
        Self { client }
    }

    /// Run the plan to completion. Returns one outcome per slice, in
    /// execution order.
    pub async fn run(&self, plan: &TwapPlan) -> Result<Vec<SliceOutcome>> {
        self.run_with_cancel(plan, &CancellationToken::new()).await
    }

    /// Like [`TwapExecutor::run`], but stops between slices once `cancel`
    /// fires. Outcomes recorded up to that point are returned.
    pub async fn run_with_cancel(
        &self,
        plan: &TwapPlan,
        cancel: &CancellationToken,
    ) -> Result<Vec<SliceOutcome>> {
        plan.validate()?;

        let slice_qty = plan.slice_qty();
        let delay = plan.delay();
        let mut outcomes = Vec::with_capacity(plan.slices as usize);

        info!(
            "Starting TWAP: {} slices of {} {}, delay {:.2}s",
            plan.slices,
            slice_qty,
            plan.symbol,
            delay.as_secs_f64()
        );

        for i in 0..plan.slices {
            info!("TWAP slice {}/{}", i + 1, plan.slices);

            match self
                .client
                .place_market_order(&plan.symbol, plan.side, slice_qty)
                .await
            {
                Ok(ack) => outcomes.push(SliceOutcome::Filled(ack)),
                Err(e) => {
                    error!("TWAP slice {}/{} failed: {}", i + 1, plan.slices, e);
                    outcomes.push(SliceOutcome::Failed {
                        error: e.to_string(),
                    });
                }
            }

            // Pace the next slice; nothing to wait for after the last one.
            if i + 1 < plan.slices {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = cancel.cancelled() => {
                        warn!("TWAP cancelled after slice {}/{}", i + 1, plan.slices);
                        break;
                    }
                }
            }
        }

        let filled = outcomes.iter().filter(|o| o.is_filled()).count();
        info!("TWAP complete: {}/{} slices filled", filled, outcomes.len());

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plan_derives_slice_qty_and_delay() {
        let plan = TwapPlan::new("btcusdt", Side::Buy, dec!(10)).with_schedule(5, 10);

        assert_eq!(plan.symbol, "BTCUSDT");
        assert_eq!(plan.slice_qty(), dec!(2));
        assert_eq!(plan.delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_plan_uneven_split() {
        let plan = TwapPlan::new("BTCUSDT", Side::Sell, dec!(1)).with_schedule(4, 30);

        assert_eq!(plan.slice_qty(), dec!(0.25));
        assert_eq!(plan.delay(), Duration::from_secs_f64(7.5));
    }

    #[test]
    fn test_plan_defaults() {
        let plan = TwapPlan::new("BTCUSDT", Side::Buy, dec!(10));

        assert_eq!(plan.slices, 5);
        assert_eq!(plan.duration_secs, 30);
        assert_eq!(plan.order_type, OrderType::Market);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_zero_slices_rejected() {
        let plan = TwapPlan::new("BTCUSDT", Side::Buy, dec!(10)).with_schedule(0, 30);

        match plan.validate() {
            Err(ExchangeError::InvalidRequest(msg)) => assert!(msg.contains("slices")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_rejected() {
        let plan = TwapPlan::new("BTCUSDT", Side::Buy, dec!(10)).with_schedule(5, 0);

        assert!(matches!(
            plan.validate(),
            Err(ExchangeError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_non_market_slices_rejected() {
        let mut plan = TwapPlan::new("BTCUSDT", Side::Buy, dec!(10));
        plan.order_type = OrderType::Limit;

        match plan.validate() {
            Err(ExchangeError::InvalidRequest(msg)) => assert!(msg.contains("MARKET")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_outcome_serializes_as_error_descriptor() {
        let outcome = SliceOutcome::Failed {
            error: "exchange returned HTTP 400 Bad Request: oops".to_string(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["error"].as_str().unwrap().contains("400"));
    }
}
