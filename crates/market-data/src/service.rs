//! Entry point for the six market data operations.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::analytics;
use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::{
    AssetType, Bar, CanonicalSymbol, IndexQuote, NewsItem, Quote, SecurityAnalysis, Sentiment,
};
use crate::news::NewsFetcher;
use crate::provider::{default_providers, MarketDataProvider};
use crate::registry::{FetchDiagnostics, QuoteAggregator, QuoteValidator};
use crate::resolver::{ResolverChain, SymbolCatalog, SymbolResolver};
use crate::sentiment::SentimentFetcher;

/// Operations exposed to the tool layer.
#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Resolve free-form input and return its live quote.
    async fn get_market_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Quote plus indicators over recent daily history.
    ///
    /// History failures degrade the result; a quote failure is an error.
    async fn get_security_analysis(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<SecurityAnalysis, MarketDataError>;

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError>;

    async fn get_market_sentiment(&self, market: &str) -> Result<Sentiment, MarketDataError>;

    async fn search_market_news(&self, query: &str) -> Result<Vec<NewsItem>, MarketDataError>;

    /// Quotes for the configured index basket; failed entries are skipped.
    async fn get_market_index(&self) -> Result<Vec<IndexQuote>, MarketDataError>;
}

pub struct MarketDataService {
    aggregator: Arc<QuoteAggregator>,
    news: NewsFetcher,
    sentiment: SentimentFetcher,
    index_basket: Vec<String>,
    analysis_interval: String,
    analysis_range: String,
}

impl MarketDataService {
    pub fn new(
        aggregator: Arc<QuoteAggregator>,
        news: NewsFetcher,
        sentiment: SentimentFetcher,
        config: &MarketDataConfig,
    ) -> Self {
        MarketDataService {
            aggregator,
            news,
            sentiment,
            index_basket: config.index_basket.clone(),
            analysis_interval: config.analysis_interval.clone(),
            analysis_range: config.analysis_range.clone(),
        }
    }

    /// Wire the default provider chain, resolver and fetchers from config.
    pub fn from_config(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let providers = default_providers(config)?;
        let search_provider: Option<Arc<dyn MarketDataProvider>> = providers
            .iter()
            .find(|p| p.capabilities().supports_search)
            .cloned();

        let catalog = config
            .extra_aliases
            .iter()
            .fold(SymbolCatalog::builtin().clone(), |catalog, (alias, symbol)| {
                catalog.with_alias(alias, symbol.as_str())
            });
        let resolver: Arc<dyn SymbolResolver> =
            Arc::new(ResolverChain::with_catalog(catalog, search_provider));

        info!(
            "Market data service ready with providers [{}]",
            providers.iter().map(|p| p.id()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self::new(
            Arc::new(QuoteAggregator::with_validator(
                providers,
                resolver,
                QuoteValidator::from_config(config),
            )),
            NewsFetcher::new(config)?,
            SentimentFetcher::new(config)?,
            config,
        ))
    }

    pub fn aggregator(&self) -> &QuoteAggregator {
        &self.aggregator
    }

    /// Quote with the per-provider attempt record.
    pub async fn get_market_quote_with_diagnostics(
        &self,
        symbol: &str,
    ) -> (Result<Quote, MarketDataError>, FetchDiagnostics) {
        let (result, diagnostics) = self.aggregator.get_quote_with_diagnostics(symbol).await;
        debug!("Quote attempts: {}", diagnostics.summary());
        (result, diagnostics)
    }

    async fn history_for(
        &self,
        symbol: &CanonicalSymbol,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        self.aggregator
            .fetch_history(&symbol.chart_symbol(), interval, range)
            .await
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_market_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.get_market_quote_with_diagnostics(symbol).await.0
    }

    async fn get_security_analysis(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<SecurityAnalysis, MarketDataError> {
        let canonical = self.aggregator.resolve(symbol).await;
        let quote = self.aggregator.fetch_latest_quote(&canonical).await?;

        let bars = match self
            .history_for(&canonical, &self.analysis_interval, &self.analysis_range)
            .await
        {
            Ok(bars) => bars,
            Err(e) => {
                warn!("History unavailable for {}, degrading analysis: {}", canonical, e);
                Vec::new()
            }
        };

        Ok(analytics::analyze(canonical.as_str(), asset_type, &quote, &bars))
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let canonical = self.aggregator.resolve(symbol).await;
        self.history_for(&canonical, interval, range).await
    }

    async fn get_market_sentiment(&self, market: &str) -> Result<Sentiment, MarketDataError> {
        self.sentiment
            .market_sentiment(market.trim(), &self.aggregator)
            .await
    }

    async fn search_market_news(&self, query: &str) -> Result<Vec<NewsItem>, MarketDataError> {
        self.news.search(query).await
    }

    async fn get_market_index(&self) -> Result<Vec<IndexQuote>, MarketDataError> {
        let mut indices = Vec::with_capacity(self.index_basket.len());

        for symbol in &self.index_basket {
            match self.aggregator.get_quote(symbol).await {
                Ok(quote) => indices.push(IndexQuote {
                    name: symbol.clone(),
                    value: quote.price,
                    change: quote.change,
                    change_pct: quote.change_pct,
                }),
                Err(e) => warn!("Skipping index {}: {}", symbol, e),
            }
        }

        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SymbolClass, Trend};
    use crate::provider::ProviderCapabilities;
    use chrono::{Duration, TimeZone, Utc};

    const ALL: &[SymbolClass] = &[SymbolClass::Listed, SymbolClass::CryptoPair];

    /// Quotes every symbol at 110 (prev 100) except `fail_symbol`; history
    /// is a rising series unless `history` is false.
    struct ChartStub {
        fail_symbol: &'static str,
        history: bool,
    }

    #[async_trait]
    impl MarketDataProvider for ChartStub {
        fn id(&self) -> &'static str {
            "CHART"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                symbol_classes: ALL,
                supports_latest: true,
                supports_historical: true,
                supports_search: false,
            }
        }

        async fn get_latest_quote(
            &self,
            symbol: &CanonicalSymbol,
        ) -> Result<Quote, MarketDataError> {
            if symbol.as_str() == self.fail_symbol {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            Quote::from_previous_close(symbol.as_str(), 110.0, 100.0, Utc::now(), "CHART")
        }

        async fn get_historical_bars(
            &self,
            symbol: &str,
            _interval: &str,
            _range: &str,
        ) -> Result<Vec<Bar>, MarketDataError> {
            if !self.history {
                return Err(MarketDataError::NoDataForRange(symbol.to_string()));
            }
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            Ok((0..61)
                .map(|i| Bar::new(start + Duration::days(i), 40.0 + i as f64, 1000.0))
                .collect())
        }
    }

    fn service(fail_symbol: &'static str, history: bool) -> MarketDataService {
        service_with(MarketDataConfig::default(), fail_symbol, history)
    }

    fn service_with(
        config: MarketDataConfig,
        fail_symbol: &'static str,
        history: bool,
    ) -> MarketDataService {
        let config = config.with_base_url("http://127.0.0.1:9");
        let aggregator = QuoteAggregator::new(
            vec![Arc::new(ChartStub {
                fail_symbol,
                history,
            })],
            Arc::new(ResolverChain::local()),
        );
        MarketDataService::new(
            Arc::new(aggregator),
            NewsFetcher::new(&config).unwrap(),
            SentimentFetcher::new(&config).unwrap(),
            &config,
        )
    }

    #[tokio::test]
    async fn test_index_basket_skips_failures() {
        let svc = service("^HSI", true);
        let indices = svc.get_market_index().await.unwrap();

        assert_eq!(indices.len(), 5);
        assert!(indices.iter().all(|i| i.name != "^HSI"));
        assert_eq!(indices[0].name, "^GSPC");
        assert_eq!(indices[0].change, 10.0);
    }

    #[tokio::test]
    async fn test_index_basket_entries_are_resolved() {
        let config = MarketDataConfig {
            index_basket: vec!["黄金".to_string(), "^GSPC".to_string()],
            ..MarketDataConfig::default()
        };
        // An unresolved "黄金" would reach the stub verbatim and fail.
        let svc = service_with(config, "黄金", true);

        let indices = svc.get_market_index().await.unwrap();

        assert_eq!(indices.len(), 2);
        assert_eq!(indices[0].name, "黄金");
        assert_eq!(indices[0].value, 110.0);
        assert_eq!(indices[1].name, "^GSPC");
    }

    #[tokio::test]
    async fn test_analysis_uses_resolved_symbol() {
        let svc = service("", true);
        let analysis = svc
            .get_security_analysis("黄金", AssetType::Gold)
            .await
            .unwrap();

        assert_eq!(analysis.symbol, "GC=F");
        assert_eq!(analysis.asset_type, AssetType::Gold);
        assert_eq!(analysis.trend, Trend::Bullish);
        assert_eq!(analysis.recent_bars.len(), 5);
    }

    #[tokio::test]
    async fn test_analysis_degrades_without_history() {
        let svc = service("", false);
        let analysis = svc
            .get_security_analysis("AAPL", AssetType::Stock)
            .await
            .unwrap();

        assert!(analysis.is_degraded());
        assert_eq!(analysis.current_price, 110.0);
    }

    #[tokio::test]
    async fn test_analysis_fails_without_quote() {
        let svc = service("AAPL", true);
        let err = svc
            .get_security_analysis("AAPL", AssetType::Stock)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_sentiment_for_equities() {
        let svc = service("", true);
        let sentiment = svc.get_market_sentiment("us_stock").await.unwrap();

        assert_eq!(sentiment.market, "us_stock");
        assert_eq!(sentiment.label, "Greed");
        assert_eq!(sentiment.score, 100.0);
    }
}
