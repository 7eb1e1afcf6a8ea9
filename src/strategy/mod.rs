pub mod twap;

pub use twap::{SliceOutcome, TwapExecutor, TwapPlan};
