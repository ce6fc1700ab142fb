use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Normalized live quote.
///
/// Every adapter produces this shape regardless of venue. `change_pct` is
/// always derived from the previous close, see [`Quote::from_previous_close`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol as reported by the venue (may differ from the requested one,
    /// e.g. `BTC-USDT` on OKX for a `BTCUSDT` request).
    pub symbol: String,

    /// Last traded / regular market price.
    pub price: f64,

    /// Absolute change against the previous close.
    pub change: f64,

    /// Percent change against the previous close.
    pub change_pct: f64,

    /// When the venue reported the price (fetch time if the venue has none).
    pub updated_at: DateTime<Utc>,

    /// Provider id that produced the quote (YAHOO, OKX, ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl Quote {
    /// Build a quote from a price and its previous close.
    ///
    /// Fails with [`MarketDataError::InvalidPriceData`] when both are zero;
    /// `change_pct` is 0 when the previous close is 0.
    pub fn from_previous_close(
        symbol: impl Into<String>,
        price: f64,
        previous_close: f64,
        updated_at: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Result<Self, MarketDataError> {
        let symbol = symbol.into();
        if price == 0.0 && previous_close == 0.0 {
            return Err(MarketDataError::InvalidPriceData(symbol));
        }

        let change = price - previous_close;
        let change_pct = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Ok(Self {
            symbol,
            price,
            change,
            change_pct,
            updated_at,
            source: source.into(),
        })
    }

    /// Previous close implied by price and change.
    pub fn previous_close(&self) -> f64 {
        self.price - self.change
    }
}
