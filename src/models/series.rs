use serde::{Deserialize, Serialize};

/// Ordered price samples for one asset, oldest first.
///
/// Samples are not assumed to be evenly spaced in time; indicators only look
/// at sequence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    values: Vec<f64>,
}

impl PriceSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
