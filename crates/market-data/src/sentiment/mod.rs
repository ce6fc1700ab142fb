//! Market sentiment readings.
//!
//! Crypto uses the public fear & greed index. Everything else, and crypto
//! when that index is down, is derived from the S&P 500 daily move.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{CanonicalSymbol, Quote, Sentiment};
use crate::provider::http;
use crate::registry::QuoteAggregator;

const SOURCE_NAME: &str = "FEAR_GREED";

/// Index quoted for the equities heuristic.
pub const EQUITY_BENCHMARK: &str = "^GSPC";

pub const MARKET_CRYPTO: &str = "crypto";
pub const MARKET_US_STOCK: &str = "us_stock";

#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    #[serde(default)]
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    value: String,
    value_classification: String,
    timestamp: String,
}

pub struct SentimentFetcher {
    client: Client,
    fear_greed_url: String,
}

impl SentimentFetcher {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: http::build_client(SOURCE_NAME, &config.user_agent, config.sentiment_timeout)?,
            fear_greed_url: config.fear_greed_url.clone(),
        })
    }

    /// Sentiment for `market`, falling back to the equities heuristic.
    ///
    /// Fails with `SentimentUnavailable(market)` only when the benchmark
    /// quote cannot be fetched either.
    pub async fn market_sentiment(
        &self,
        market: &str,
        aggregator: &QuoteAggregator,
    ) -> Result<Sentiment, MarketDataError> {
        if market == MARKET_CRYPTO {
            match self.crypto_fear_greed().await {
                Ok(sentiment) => return Ok(sentiment),
                Err(e) => warn!("Fear & greed index unavailable ({}), using {}", e, EQUITY_BENCHMARK),
            }
        }

        let benchmark = CanonicalSymbol::passthrough(EQUITY_BENCHMARK);
        match aggregator.fetch_latest_quote(&benchmark).await {
            Ok(quote) => Ok(equity_sentiment(&quote)),
            Err(e) => {
                warn!("Benchmark quote failed for {} sentiment: {}", market, e);
                Err(MarketDataError::SentimentUnavailable(market.to_string()))
            }
        }
    }

    /// Latest crypto fear & greed reading.
    pub async fn crypto_fear_greed(&self) -> Result<Sentiment, MarketDataError> {
        debug!("Fetching fear & greed index");
        let response: FearGreedResponse =
            http::get_json(&self.client, SOURCE_NAME, &self.fear_greed_url).await?;

        let entry = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::parse(SOURCE_NAME, "empty data array"))?;

        let score = http::parse_decimal_str(SOURCE_NAME, "value", &entry.value)?;
        let timestamp = entry
            .timestamp
            .trim()
            .parse::<i64>()
            .map_err(|_| {
                MarketDataError::parse(
                    SOURCE_NAME,
                    format!("Invalid timestamp '{}'", entry.timestamp),
                )
            })?;

        Ok(Sentiment {
            market: MARKET_CRYPTO.to_string(),
            score,
            description: format!(
                "Crypto Fear & Greed Index is {}",
                entry.value_classification
            ),
            label: entry.value_classification,
            timestamp,
        })
    }
}

/// Map an index's daily move onto a 0-100 fear/greed scale.
pub fn equity_sentiment(quote: &Quote) -> Sentiment {
    let pct = quote.change_pct;
    let label = if pct > 1.0 {
        "Greed"
    } else if pct < -1.0 {
        "Fear"
    } else {
        "Neutral"
    };

    Sentiment {
        market: MARKET_US_STOCK.to_string(),
        score: (50.0 + pct * 10.0).clamp(0.0, 100.0),
        label: label.to_string(),
        description: format!("S&P 500 Daily Change is {:.2}%", pct),
        timestamp: Utc::now().timestamp(),
    }
}
