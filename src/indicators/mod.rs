pub mod engine;
pub mod momentum;

pub use engine::{IndicatorEngine, MIN_SAMPLES};
