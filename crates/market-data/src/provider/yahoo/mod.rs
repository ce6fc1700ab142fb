//! Yahoo Finance chart provider.
//!
//! Primary multi-asset source. Uses the v8 chart API for both live quotes
//! (`interval=1d&range=1d`) and bar series, and the v1 search API for
//! free-text symbol lookup:
//! - Equities/ETFs (e.g., AAPL, 0700.HK, 600519.SS)
//! - Futures (e.g., GC=F, CL=F)
//! - Foreign exchange rates (e.g., EURUSD=X)
//! - Indices (e.g., ^GSPC)

mod models;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use urlencoding::encode;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{Bar, CanonicalSymbol, Quote, SearchHit, SymbolClass};
use crate::provider::http;
use crate::provider::{MarketDataProvider, ProviderCapabilities};

use models::{ChartResponse, ChartResult, SearchResponse};

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance chart/search provider.
pub struct YahooProvider {
    chart_client: Client,
    search_client: Client,
    chart_url: String,
    search_url: String,
}

impl YahooProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            chart_client: http::build_client(PROVIDER_ID, &config.user_agent, config.chart_timeout)?,
            search_client: http::build_client(
                PROVIDER_ID,
                &config.user_agent,
                config.search_timeout,
            )?,
            chart_url: config.yahoo_chart_url.trim_end_matches('/').to_string(),
            search_url: config.yahoo_search_url.trim_end_matches('/').to_string(),
        })
    }

    // ========================================================================
    // Chart API
    // ========================================================================

    async fn fetch_chart(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<ChartResult, MarketDataError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval={}&range={}",
            self.chart_url,
            encode(symbol),
            encode(interval),
            encode(range)
        );

        let response = self
            .chart_client
            .get(&url)
            .send()
            .await
            .map_err(|e| http::transport_error(PROVIDER_ID, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        let response = http::check_status(PROVIDER_ID, response)?;

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::parse(PROVIDER_ID, e.to_string()))?;

        if let Some(error) = chart.chart.error {
            debug!(
                "Chart API error for {}: {:?} {:?}",
                symbol, error.code, error.description
            );
        }

        chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

/// Normalize chart metadata into a [`Quote`].
fn chart_to_quote(requested: &str, result: &ChartResult) -> Result<Quote, MarketDataError> {
    let meta = &result.meta;
    let price = meta
        .regular_market_price
        .ok_or_else(|| MarketDataError::InvalidPriceData(requested.to_string()))?;

    let previous_close = match meta.previous_close {
        Some(prev) if prev != 0.0 => prev,
        _ => meta.chart_previous_close.unwrap_or(0.0),
    };

    let symbol = if meta.symbol.is_empty() {
        requested
    } else {
        meta.symbol.as_str()
    };

    let updated_at = meta
        .regular_market_time
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now);

    Quote::from_previous_close(symbol, price, previous_close, updated_at, PROVIDER_ID)
}

/// Zip timestamps with close/volume arrays into ascending, gap-free bars.
fn chart_to_bars(symbol: &str, result: ChartResult) -> Result<Vec<Bar>, MarketDataError> {
    let series = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .ok_or_else(|| MarketDataError::NoDataForRange(symbol.to_string()))?;

    let mut points: Vec<(DateTime<Utc>, Bar)> = result
        .timestamp
        .iter()
        .enumerate()
        .take_while(|(i, _)| *i < series.close.len())
        .filter_map(|(i, ts)| {
            let timestamp = Utc.timestamp_opt(*ts, 0).single()?;
            let close = series.close[i].unwrap_or(0.0);
            let volume = series.volume.get(i).copied().flatten().unwrap_or(0.0);
            let bar = Bar::new(timestamp, close, volume);
            (!bar.is_gap()).then_some((timestamp, bar))
        })
        .collect();

    points.sort_by_key(|(timestamp, _)| *timestamp);
    points.dedup_by_key(|(timestamp, _)| *timestamp);

    Ok(points.into_iter().map(|(_, bar)| bar).collect())
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            symbol_classes: &[SymbolClass::Listed, SymbolClass::CryptoPair],
            supports_latest: true,
            supports_historical: true,
            supports_search: true,
        }
    }

    async fn get_latest_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest quote for {} from Yahoo chart API", symbol);
        let result = self.fetch_chart(symbol.as_str(), "1d", "1d").await?;
        chart_to_quote(symbol.as_str(), &result)
    }

    async fn get_historical_bars(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        debug!(
            "Fetching {} bars over {} for {} from Yahoo chart API",
            interval, range, symbol
        );
        let result = self.fetch_chart(symbol, interval, range).await?;
        let bars = chart_to_bars(symbol, result)?;
        if bars.is_empty() {
            warn!("No usable bars for '{}' ({} / {})", symbol, interval, range);
        }
        Ok(bars)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
        let url = format!(
            "{}/v1/finance/search?q={}&lang=zh-CN&region=CN&quotesCount=1&newsCount=0",
            self.search_url,
            encode(query)
        );

        debug!("Searching Yahoo for '{}'", query);

        let response: SearchResponse =
            http::get_json(&self.search_client, PROVIDER_ID, &url).await?;

        Ok(response
            .quotes
            .into_iter()
            .map(|q| {
                let name = q.long_name.or(q.short_name).unwrap_or_default();
                SearchHit::new(
                    q.symbol,
                    name,
                    q.exchange.unwrap_or_default(),
                    q.type_disp.unwrap_or_default(),
                )
            })
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BROWSER_USER_AGENT;
    use mockito::Matcher;

    fn chart(json: &str) -> ChartResult {
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        response.chart.result.unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn test_chart_to_quote_uses_previous_close() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","regularMarketPrice":110.0,"previousClose":100.0,"chartPreviousClose":90.0,"regularMarketTime":1700000000}}]}}"#,
        );
        let quote = chart_to_quote("AAPL", &result).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.change, 10.0);
        assert!((quote.change_pct - 10.0).abs() < 1e-9);
        assert_eq!(quote.updated_at.timestamp(), 1_700_000_000);
        assert_eq!(quote.source, "YAHOO");
    }

    #[test]
    fn test_chart_to_quote_falls_back_to_chart_previous_close() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{"symbol":"GC=F","regularMarketPrice":2100.0,"previousClose":0,"chartPreviousClose":2000.0}}]}}"#,
        );
        let quote = chart_to_quote("GC=F", &result).unwrap();
        assert_eq!(quote.change, 100.0);
        assert!((quote.change_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_to_quote_rejects_zero_data() {
        let result = chart(r#"{"chart":{"result":[{"meta":{"symbol":"ZZZ"}}]}}"#);
        let err = chart_to_quote("ZZZ", &result).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidPriceData(_)));
    }

    #[test]
    fn test_chart_to_quote_requires_market_price() {
        let result = chart(
            r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","previousClose":190.0,"chartPreviousClose":190.0}}]}}"#,
        );
        let err = chart_to_quote("AAPL", &result).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidPriceData(s) if s == "AAPL"));
    }

    #[test]
    fn test_chart_to_bars_drops_gaps_and_sorts() {
        let result = chart(
            r#"{"chart":{"result":[{
                "meta":{"symbol":"AAPL"},
                "timestamp":[1700172800,1700000000,1700086400,1700086400],
                "indicators":{"quote":[{"close":[103.0,101.0,null,102.0],"volume":[300,100,null,200]}]}
            }]}}"#,
        );
        let bars = chart_to_bars("AAPL", result).unwrap();

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![101.0, 102.0, 103.0]);
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_chart_to_bars_without_indicators() {
        let result = chart(r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},"timestamp":[1700000000]}]}}"#);
        let err = chart_to_bars("AAPL", result).unwrap_err();
        assert!(matches!(err, MarketDataError::NoDataForRange(_)));
    }

    #[tokio::test]
    async fn test_latest_quote_sends_browser_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v8/finance/chart/AAPL")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("interval".into(), "1d".into()),
                Matcher::UrlEncoded("range".into(), "1d".into()),
            ]))
            .match_header("user-agent", BROWSER_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","regularMarketPrice":190.0,"previousClose":200.0,"regularMarketTime":1700000000}}],"error":null}}"#)
            .create_async()
            .await;

        let config = MarketDataConfig::default().with_base_url(&server.url());
        let provider = YahooProvider::new(&config).unwrap();

        let quote = provider
            .get_latest_quote(&CanonicalSymbol::passthrough("AAPL"))
            .await
            .unwrap();

        assert_eq!(quote.price, 190.0);
        assert_eq!(quote.change, -10.0);
        assert!((quote.change_pct + 5.0).abs() < 1e-9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v8/finance/chart/NOPE")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#)
            .create_async()
            .await;

        let config = MarketDataConfig::default().with_base_url(&server.url());
        let provider = YahooProvider::new(&config).unwrap();

        let err = provider
            .get_latest_quote(&CanonicalSymbol::passthrough("NOPE"))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[tokio::test]
    async fn test_history_passes_interval_and_range_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v8/finance/chart/BTC-USD")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("interval".into(), "1h".into()),
                Matcher::UrlEncoded("range".into(), "5d".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"chart":{"result":[{"meta":{"symbol":"BTC-USD"},"timestamp":[1700000000,1700003600],"indicators":{"quote":[{"close":[0,37000.5],"volume":[0,12]}]}}]}}"#)
            .create_async()
            .await;

        let config = MarketDataConfig::default().with_base_url(&server.url());
        let provider = YahooProvider::new(&config).unwrap();

        let bars = provider
            .get_historical_bars("BTC-USD", "1h", "5d")
            .await
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 37000.5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_prefers_long_name() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/finance/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "腾讯控股".into()),
                Matcher::UrlEncoded("quotesCount".into(), "1".into()),
            ]))
            .match_header("user-agent", BROWSER_USER_AGENT)
            .with_status(200)
            .with_body(r#"{"quotes":[{"symbol":"0700.HK","shortname":"TENCENT","longname":"Tencent Holdings Limited","exchange":"HKG","typeDisp":"Equity"}]}"#)
            .create_async()
            .await;

        let config = MarketDataConfig::default().with_base_url(&server.url());
        let provider = YahooProvider::new(&config).unwrap();

        let hits = provider.search("腾讯控股").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "0700.HK");
        assert_eq!(hits[0].name, "Tencent Holdings Limited");
    }
}
