//! Runtime configuration for the market data core.

use std::time::Duration;

/// Browser user agent sent on every outbound call; venues answer 403/429 to
/// library defaults.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Symbols quoted by `get_market_index`.
pub const DEFAULT_INDEX_BASKET: &[&str] = &["^GSPC", "^IXIC", "^HSI", "000001.SS", "BTC-USD", "GC=F"];

/// Endpoints, timeouts and limits for the market data core.
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    pub user_agent: String,

    /// Yahoo chart host (`/v8/finance/chart`).
    pub yahoo_chart_url: String,
    /// Yahoo search host (`/v1/finance/search`).
    pub yahoo_search_url: String,
    pub binance_url: String,
    pub okx_url: String,
    /// Full URL of the crypto fear & greed endpoint.
    pub fear_greed_url: String,

    pub search_timeout: Duration,
    pub chart_timeout: Duration,
    pub crypto_timeout: Duration,
    pub news_timeout: Duration,
    pub sentiment_timeout: Duration,

    pub index_basket: Vec<String>,
    /// Extra `(alias, symbol)` pairs layered over the built-in alias table.
    pub extra_aliases: Vec<(String, String)>,
    pub news_limit: usize,
    /// Characters kept from a news summary before `...` is appended.
    pub news_summary_chars: usize,

    /// Interval/range of the history used by security analysis.
    pub analysis_interval: String,
    pub analysis_range: String,

    /// Reject negative prices instead of warning (some futures settle below
    /// zero, so they are accepted by default).
    pub reject_negative_prices: bool,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            yahoo_chart_url: "https://query1.finance.yahoo.com".to_string(),
            yahoo_search_url: "https://query2.finance.yahoo.com".to_string(),
            binance_url: "https://api.binance.com".to_string(),
            okx_url: "https://www.okx.com".to_string(),
            fear_greed_url: "https://api.alternative.me/fng/".to_string(),
            search_timeout: Duration::from_secs(5),
            chart_timeout: Duration::from_secs(10),
            crypto_timeout: Duration::from_secs(8),
            news_timeout: Duration::from_secs(10),
            sentiment_timeout: Duration::from_secs(10),
            index_basket: DEFAULT_INDEX_BASKET.iter().map(|s| s.to_string()).collect(),
            extra_aliases: Vec::new(),
            news_limit: 5,
            news_summary_chars: 200,
            analysis_interval: "1d".to_string(),
            analysis_range: "3mo".to_string(),
            reject_negative_prices: false,
        }
    }
}

impl MarketDataConfig {
    /// Build a config from `INVESTOR_*` environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let string = |key: &str, default: String| lookup(key).filter(|v| !v.is_empty()).unwrap_or(default);
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let index_basket = lookup("INVESTOR_INDEX_BASKET")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|basket| !basket.is_empty())
            .unwrap_or(defaults.index_basket);

        // INVESTOR_EXTRA_ALIASES="铜价:HG=F,纳指:^IXIC"
        let extra_aliases = lookup("INVESTOR_EXTRA_ALIASES")
            .map(|v| parse_alias_pairs(&v))
            .unwrap_or_default();

        Self {
            user_agent: string("INVESTOR_USER_AGENT", defaults.user_agent),
            yahoo_chart_url: string("INVESTOR_YAHOO_CHART_URL", defaults.yahoo_chart_url),
            yahoo_search_url: string("INVESTOR_YAHOO_SEARCH_URL", defaults.yahoo_search_url),
            binance_url: string("INVESTOR_BINANCE_URL", defaults.binance_url),
            okx_url: string("INVESTOR_OKX_URL", defaults.okx_url),
            fear_greed_url: string("INVESTOR_FEAR_GREED_URL", defaults.fear_greed_url),
            search_timeout: millis("INVESTOR_SEARCH_TIMEOUT_MS", defaults.search_timeout),
            chart_timeout: millis("INVESTOR_CHART_TIMEOUT_MS", defaults.chart_timeout),
            crypto_timeout: millis("INVESTOR_CRYPTO_TIMEOUT_MS", defaults.crypto_timeout),
            news_timeout: millis("INVESTOR_NEWS_TIMEOUT_MS", defaults.news_timeout),
            sentiment_timeout: millis("INVESTOR_SENTIMENT_TIMEOUT_MS", defaults.sentiment_timeout),
            index_basket,
            extra_aliases,
            news_limit: lookup("INVESTOR_NEWS_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.news_limit),
            news_summary_chars: defaults.news_summary_chars,
            analysis_interval: defaults.analysis_interval,
            analysis_range: defaults.analysis_range,
            reject_negative_prices: lookup("INVESTOR_REJECT_NEGATIVE_PRICES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.reject_negative_prices),
        }
    }

    /// Point every upstream at one base URL (mock servers in tests).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.yahoo_chart_url = base.clone();
        self.yahoo_search_url = base.clone();
        self.binance_url = base.clone();
        self.okx_url = base.clone();
        self.fear_greed_url = format!("{}/fng/", base);
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_alias_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (alias, symbol) = pair.split_once(':')?;
            let (alias, symbol) = (alias.trim(), symbol.trim());
            (!alias.is_empty() && !symbol.is_empty())
                .then(|| (alias.to_string(), symbol.to_string()))
        })
        .collect()
}
