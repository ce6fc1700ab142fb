//! Investor Market Data Crate
//!
//! Resolves free-form symbol input, quotes it through an ordered chain of
//! public venues and derives analytics, sentiment and news for a
//! conversational market assistant.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Symbol resolution from tickers, aliases, Chinese names and numeric codes
//! - Multiple providers: OKX, Binance, Yahoo chart API, yahoo_finance_api
//! - Ordered fallback with per-attempt diagnostics
//! - Technical indicators over daily history
//! - RSS news and fear & greed sentiment
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   Raw input      |  ("比特币", "600519", "AAPL")
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  ResolverChain   |  alias -> name -> suffix -> remote search
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | CanonicalSymbol  |  (BTCUSDT, 600519.SS, AAPL)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | QuoteAggregator  |  OKX -> BINANCE -> YAHOO -> LEGACY
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |      Quote       |
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataService`] - The six operations used by the tool layer
//! - [`CanonicalSymbol`] - Resolver output in a venue's vocabulary
//! - [`Quote`] - Normalized live quote
//! - [`SecurityAnalysis`] - Indicator snapshot
//! - [`MarketDataError`] - Error type with [`ErrorKind`] classification

pub mod analytics;
pub mod config;
pub mod errors;
pub mod models;
pub mod news;
pub mod provider;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod sentiment;
pub mod service;

pub use config::{MarketDataConfig, BROWSER_USER_AGENT, DEFAULT_INDEX_BASKET};
pub use errors::{ErrorKind, MarketDataError};

// Re-export all public types from models
pub use models::{
    AssetType, Bar, CanonicalSymbol, IndexQuote, NewsItem, Quote, ResolutionSource, SearchHit,
    SecurityAnalysis, Sentiment, SymbolClass, Trend,
};

// Re-export resolver types
pub use resolver::{ResolverChain, SymbolCatalog, SymbolResolver};

// Re-export provider types
pub use provider::binance::BinanceProvider;
pub use provider::legacy::LegacyYahooProvider;
pub use provider::okx::OkxProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{default_providers, MarketDataProvider, ProviderCapabilities};

// Re-export registry types
pub use registry::{FetchDiagnostics, ProviderAttempt, QuoteAggregator, QuoteValidator, SkipReason};

pub use news::NewsFetcher;
pub use sentiment::SentimentFetcher;
pub use service::{MarketDataService, MarketDataServiceTrait};
