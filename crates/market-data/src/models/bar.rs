use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily (or intraday) bar of a historical series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar date, `YYYY-MM-DD`.
    pub date: String,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: DateTime<Utc>, close: f64, volume: f64) -> Self {
        Self {
            date: timestamp.format("%Y-%m-%d").to_string(),
            close,
            volume,
        }
    }

    /// Zero close with zero volume marks a trading gap, not data.
    pub fn is_gap(&self) -> bool {
        self.close == 0.0 && self.volume == 0.0
    }
}
