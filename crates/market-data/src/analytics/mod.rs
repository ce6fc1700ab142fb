//! Technical analytics over historical bars.
//!
//! Pure functions; fetching is the service's job.

pub mod indicators;

use crate::models::{AssetType, Bar, Quote, SecurityAnalysis};

use indicators::{
    classify_trend, rsi, sma, support_resistance, volume_ratio, MA_LONG, MA_SHORT, RSI_PERIOD,
};

/// Bars kept in [`SecurityAnalysis::recent_bars`].
pub const RECENT_BARS: usize = 5;

/// Build a [`SecurityAnalysis`] from a live quote and its ascending bars.
///
/// An empty series yields the degraded form (trend `unknown`, zero
/// indicators).
pub fn analyze(
    symbol: &str,
    asset_type: AssetType,
    quote: &Quote,
    bars: &[Bar],
) -> SecurityAnalysis {
    let Some((support, resistance)) = support_resistance(bars) else {
        return SecurityAnalysis::degraded(symbol, asset_type, quote.price);
    };

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ma20 = sma(&closes, MA_SHORT);
    let ma60 = sma(&closes, MA_LONG);

    SecurityAnalysis {
        symbol: symbol.to_string(),
        asset_type,
        current_price: quote.price,
        ma20,
        ma60,
        rsi: rsi(&closes, RSI_PERIOD),
        volume_ratio: volume_ratio(bars),
        trend: classify_trend(quote.price, ma20, ma60),
        support,
        resistance,
        recent_bars: bars[bars.len().saturating_sub(RECENT_BARS)..].to_vec(),
    }
}
