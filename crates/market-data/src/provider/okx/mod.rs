//! OKX spot ticker provider.
//!
//! First choice for exchange crypto pairs. OKX instrument ids are dashed
//! (`BTC-USDT`), so undashed pairs are rewritten before the call. The 24h
//! change is measured against `open24h`.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use urlencoding::encode;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{CanonicalSymbol, Quote, SymbolClass, CRYPTO_QUOTE_CURRENCIES};
use crate::provider::http;
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "OKX";

#[derive(Debug, Deserialize)]
struct TickerResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<Ticker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    inst_id: String,
    last: String,
    #[serde(rename = "open24h")]
    open_24h: String,
    /// Milliseconds since epoch, string-encoded.
    #[serde(default)]
    ts: Option<String>,
}

pub struct OkxProvider {
    client: Client,
    base_url: String,
}

impl OkxProvider {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: http::build_client(PROVIDER_ID, &config.user_agent, config.crypto_timeout)?,
            base_url: config.okx_url.trim_end_matches('/').to_string(),
        })
    }
}

/// `btcusdt` -> `BTC-USDT`; already dashed ids are only uppercased.
fn to_inst_id(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    if upper.contains('-') {
        return upper;
    }
    CRYPTO_QUOTE_CURRENCIES
        .iter()
        .find_map(|quote| {
            upper
                .strip_suffix(quote)
                .filter(|base| !base.is_empty())
                .map(|base| format!("{}-{}", base, quote))
        })
        .unwrap_or(upper)
}

fn ticker_to_quote(symbol: &str, response: TickerResponse) -> Result<Quote, MarketDataError> {
    if response.code != "0" {
        return Err(MarketDataError::provider(
            PROVIDER_ID,
            format!("code {}: {}", response.code, response.msg),
        ));
    }
    let ticker = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let price = http::parse_decimal_str(PROVIDER_ID, "last", &ticker.last)?;
    let open = http::parse_decimal_str(PROVIDER_ID, "open24h", &ticker.open_24h)?;
    let updated_at = ticker
        .ts
        .as_deref()
        .and_then(|ts| ts.parse::<i64>().ok())
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Utc::now);

    Quote::from_previous_close(ticker.inst_id, price, open, updated_at, PROVIDER_ID)
}

#[async_trait]
impl MarketDataProvider for OkxProvider {
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
        let inst_id = to_inst_id(symbol.as_str());
        debug!("Fetching OKX ticker for {}", inst_id);

        let url = format!(
            "{}/api/v5/market/ticker?instId={}",
            self.base_url,
            encode(&inst_id)
        );
        let response: TickerResponse = http::get_json(&self.client, PROVIDER_ID, &url).await?;
        ticker_to_quote(&inst_id, response)
    }
}
