//! Indicator math over close/volume series.
//!
//! Every function is total: short series yield the documented sentinel
//! instead of an error.

use crate::models::{Bar, Trend};

pub const MA_SHORT: usize = 20;
pub const MA_LONG: usize = 60;
pub const RSI_PERIOD: usize = 14;
/// Bars averaged for the volume ratio baseline.
pub const VOLUME_LOOKBACK: usize = 5;
/// Bars scanned for support/resistance.
pub const LEVEL_LOOKBACK: usize = 20;

const RSI_NEUTRAL: f64 = 50.0;

/// Simple moving average of the last `period` values; 0 when too short.
pub fn sma(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return 0.0;
    }
    values[values.len() - period..].iter().sum::<f64>() / period as f64
}

/// RSI over the final `period` deltas (simple sums, no smoothing).
///
/// Returns 50 with fewer than `period + 1` values and 100 when there were no
/// losses.
pub fn rsi(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let (gains, losses) = values[values.len() - period - 1..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(gains, losses), delta| {
            if delta > 0.0 {
                (gains + delta, losses)
            } else {
                (gains, losses - delta)
            }
        });

    if losses == 0.0 {
        return 100.0;
    }

    let rs = gains / losses;
    100.0 - 100.0 / (1.0 + rs)
}

/// Last volume over the mean of the preceding [`VOLUME_LOOKBACK`] volumes.
pub fn volume_ratio(bars: &[Bar]) -> f64 {
    let n = bars.len();
    if n < VOLUME_LOOKBACK + 1 {
        return 0.0;
    }

    let mean = bars[n - VOLUME_LOOKBACK - 1..n - 1]
        .iter()
        .map(|b| b.volume)
        .sum::<f64>()
        / VOLUME_LOOKBACK as f64;

    if mean > 0.0 {
        bars[n - 1].volume / mean
    } else {
        0.0
    }
}

/// (support, resistance) as min/max close over the last
/// [`LEVEL_LOOKBACK`] bars. `None` for an empty series.
pub fn support_resistance(bars: &[Bar]) -> Option<(f64, f64)> {
    let window = &bars[bars.len().saturating_sub(LEVEL_LOOKBACK)..];
    window.iter().map(|b| b.close).fold(None, |acc, close| match acc {
        None => Some((close, close)),
        Some((low, high)) => Some((low.min(close), high.max(close))),
    })
}

/// Trend from price against the two moving averages.
///
/// Needs both averages; a zero (unavailable) average keeps the trend
/// sideways.
pub fn classify_trend(price: f64, ma20: f64, ma60: f64) -> Trend {
    if ma20 == 0.0 || ma60 == 0.0 {
        return Trend::Sideways;
    }
    if ma20 > ma60 && price > ma20 {
        Trend::Bullish
    } else if ma20 < ma60 && price < ma20 {
        Trend::Bearish
    } else {
        Trend::Sideways
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (c, v))| Bar {
                date: format!("2024-01-{:02}", i + 1),
                close: *c,
                volume: *v,
            })
            .collect()
    }

    #[test]
    fn test_sma_sentinel_and_mean() {
        assert_eq!(sma(&[1.0, 2.0], 3), 0.0);
        assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), 3.5);
        let twenty: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(sma(&twenty, 20), 10.5);
    }

    #[test]
    fn test_rsi_monotonic_increase_is_100() {
        let rising: Vec<f64> = (1..=15).map(f64::from).collect();
        assert_eq!(rsi(&rising, RSI_PERIOD), 100.0);
    }

    #[test]
    fn test_rsi_short_series_is_neutral() {
        let short: Vec<f64> = (1..=14).map(f64::from).collect();
        assert_eq!(rsi(&short, RSI_PERIOD), 50.0);
    }

    #[test]
    fn test_rsi_uses_only_final_deltas() {
        // big drop at the start falls outside the 14-delta window
        let mut series = vec![1000.0];
        series.extend((1..=15).map(f64::from));
        assert_eq!(rsi(&series, RSI_PERIOD), 100.0);
    }

    #[test]
    fn test_rsi_balanced() {
        let mut series = vec![10.0];
        for i in 0..14 {
            let last = *series.last().unwrap();
            series.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        assert!((rsi(&series, RSI_PERIOD) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume_ratio() {
        let b = bars(&[1.0; 6], &[100.0, 100.0, 100.0, 100.0, 100.0, 250.0]);
        assert_eq!(volume_ratio(&b), 2.5);

        let short = bars(&[1.0; 5], &[100.0; 5]);
        assert_eq!(volume_ratio(&short), 0.0);

        let silent = bars(&[1.0; 6], &[0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
        assert_eq!(volume_ratio(&silent), 0.0);
    }

    #[test]
    fn test_support_resistance_window() {
        let mut closes = vec![1.0, 500.0];
        closes.extend((0..20).map(|i| 100.0 + i as f64));
        let b = bars(&closes, &vec![1.0; closes.len()]);
        assert_eq!(support_resistance(&b), Some((100.0, 119.0)));
        assert_eq!(support_resistance(&[]), None);
    }

    #[test]
    fn test_classify_trend() {
        assert_eq!(classify_trend(120.0, 110.0, 100.0), Trend::Bullish);
        assert_eq!(classify_trend(80.0, 90.0, 100.0), Trend::Bearish);
        assert_eq!(classify_trend(105.0, 110.0, 100.0), Trend::Sideways);
        assert_eq!(classify_trend(120.0, 110.0, 0.0), Trend::Sideways);
    }
}
