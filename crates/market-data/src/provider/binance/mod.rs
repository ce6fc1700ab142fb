//! Binance 24h ticker provider.
//!
//! Second crypto venue. Binance symbols are undashed (`BTCUSDT`); numbers
//! arrive string-encoded and the ticker carries no timestamp.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use urlencoding::encode;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{CanonicalSymbol, Quote, SymbolClass};
use crate::provider::http;
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "BINANCE";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    symbol: String,
    last_price: String,
    price_change: String,
}

pub struct BinanceProvider {
    client: Client,
    base_url: String,
}

impl BinanceProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: http::build_client(PROVIDER_ID, &config.user_agent, config.crypto_timeout)?,
            base_url: config.binance_url.trim_end_matches('/').to_string(),
        })
    }
}

fn ticker_to_quote(ticker: Ticker24h) -> Result<Quote, MarketDataError> {
    let price = http::parse_decimal_str(PROVIDER_ID, "lastPrice", &ticker.last_price)?;
    let change = http::parse_decimal_str(PROVIDER_ID, "priceChange", &ticker.price_change)?;
    Quote::from_previous_close(ticker.symbol, price, price - change, Utc::now(), PROVIDER_ID)
}

#[async_trait]
impl MarketDataProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            symbol_classes: &[SymbolClass::CryptoPair],
            supports_latest: true,
            supports_historical: false,
            supports_search: false,
        }
    }

    async fn get_latest_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, MarketDataError> {
        let pair = symbol.as_str().to_uppercase().replace('-', "");
        debug!("Fetching Binance 24h ticker for {}", pair);

        let url = format!("{}/api/v3/ticker/24hr?symbol={}", self.base_url, encode(&pair));
        let ticker: Ticker24h = http::get_json(&self.client, PROVIDER_ID, &url).await?;
        ticker_to_quote(ticker)
    }
}
