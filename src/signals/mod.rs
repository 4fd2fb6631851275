//! Signal evaluation interfaces.

pub mod alert;

pub use alert::{AlertEvaluator, GALAXY_SCORE_THRESHOLD, RSI_OVERSOLD_THRESHOLD};
