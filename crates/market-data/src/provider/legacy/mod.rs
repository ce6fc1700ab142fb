//! Last-resort provider backed by the `yahoo_finance_api` library client.
//!
//! Only reached when the chart adapter failed. The connector shares the
//! browser user agent and chart timeout; each call is also bounded with
//! `tokio::time::timeout`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{CanonicalSymbol, Quote, SymbolClass};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "LEGACY";

pub struct LegacyYahooProvider {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl LegacyYahooProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::builder()
            .user_agent(&config.user_agent)
            .timeout(config.chart_timeout)
            .build()
            .map_err(|e| {
                MarketDataError::provider(
                    PROVIDER_ID,
                    format!("Failed to initialize Yahoo connector: {}", e),
                )
            })?;
        Ok(Self {
            connector,
            timeout: config.chart_timeout,
        })
    }
}

/// Timestamp, open and close of one library bar.
#[derive(Clone, Copy, Debug)]
struct DailyBar {
    timestamp: i64,
    open: f64,
    close: f64,
}

impl From<&yahoo::Quote> for DailyBar {
    fn from(quote: &yahoo::Quote) -> Self {
        Self {
            timestamp: quote.timestamp as i64,
            open: quote.open,
            close: quote.close,
        }
    }
}

/// Last bar is the price; the bar before it (or the last bar's open) is the
/// previous close.
fn bars_to_quote(symbol: &str, bars: &[DailyBar]) -> Result<Quote, MarketDataError> {
    let last = bars
        .last()
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
    let previous_close = match bars.len() {
        0 | 1 => last.open,
        n => bars[n - 2].close,
    };
    let updated_at = Utc
        .timestamp_opt(last.timestamp, 0)
        .single()
        .unwrap_or_else(Utc::now);

    Quote::from_previous_close(symbol, last.close, previous_close, updated_at, PROVIDER_ID)
}

#[async_trait]
impl MarketDataProvider for LegacyYahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            symbol_classes: &[SymbolClass::Listed, SymbolClass::CryptoPair],
            supports_latest: true,
            supports_historical: false,
            supports_search: false,
        }
    }

    async fn get_latest_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, MarketDataError> {
        let symbol = symbol.as_str();
        debug!("Fetching latest quote for {} via library client", symbol);

        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_latest_quotes(symbol, "1d"),
        )
        .await
        .map_err(|_| MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        })?
        .map_err(|e| {
            if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                MarketDataError::SymbolNotFound(symbol.to_string())
            } else {
                MarketDataError::provider(PROVIDER_ID, e.to_string())
            }
        })?;

        let bars = response.quotes().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.to_string())
        })?;

        let bars: Vec<DailyBar> = bars.iter().map(DailyBar::from).collect();
        bars_to_quote(symbol, &bars)
    }
}
