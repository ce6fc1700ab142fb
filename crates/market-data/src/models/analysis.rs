use serde::{Deserialize, Serialize};
use std::fmt;

use super::bar::Bar;

/// Asset class tag carried through analysis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Stock,
    Crypto,
    Gold,
    Forex,
    Commodity,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
            AssetType::Gold => "gold",
            AssetType::Forex => "forex",
            AssetType::Commodity => "commodity",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
    /// History was unavailable; only the degraded analysis exists.
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Sideways => "sideways",
            Trend::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technical snapshot of a security, recomputed per request.
///
/// Indicator fields use 0 as the "unavailable" sentinel (except RSI, which
/// defaults to a neutral 50).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnalysis {
    pub symbol: String,
    pub asset_type: AssetType,
    pub current_price: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub rsi: f64,
    #[serde(rename = "vol_ratio")]
    pub volume_ratio: f64,
    pub trend: Trend,
    pub support: f64,
    pub resistance: f64,
    /// Last five bars for context.
    #[serde(rename = "recent_klines")]
    pub recent_bars: Vec<Bar>,
}

impl SecurityAnalysis {
    /// Analysis with only the quote-derived fields, used when history is missing.
    pub fn degraded(symbol: impl Into<String>, asset_type: AssetType, current_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            asset_type,
            current_price,
            ma20: 0.0,
            ma60: 0.0,
            rsi: 0.0,
            volume_ratio: 0.0,
            trend: Trend::Unknown,
            support: 0.0,
            resistance: 0.0,
            recent_bars: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.trend == Trend::Unknown
    }
}
