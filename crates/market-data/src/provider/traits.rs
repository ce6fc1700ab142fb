//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that every venue
//! adapter implements.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Bar, CanonicalSymbol, Quote, SearchHit};

use super::capabilities::ProviderCapabilities;

/// Trait for market data providers.
///
/// Implement this trait to add a new venue. The aggregator walks an ordered
/// list of providers and uses [`capabilities`](Self::capabilities) to skip
/// the ones that cannot handle a symbol.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use investor_market_data::provider::{MarketDataProvider, ProviderCapabilities};
///
/// struct DeskFeed;
///
/// #[async_trait]
/// impl MarketDataProvider for DeskFeed {
///     fn id(&self) -> &'static str {
///         "DESK"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             symbol_classes: &[SymbolClass::Listed],
///             supports_latest: true,
///             supports_historical: false,
///             supports_search: false,
///         }
///     }
///
///     async fn get_latest_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO", "OKX", etc.
    /// Used for logging and fetch diagnostics.
    fn id(&self) -> &'static str;

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch the latest quote for a canonical symbol.
    async fn get_latest_quote(&self, symbol: &CanonicalSymbol) -> Result<Quote, MarketDataError>;

    /// Fetch a bar series with interval and range passed through to the venue.
    ///
    /// Bars are returned in ascending date order with gap bars removed.
    /// Default implementation returns `NotSupported`.
    async fn get_historical_bars(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let _ = (symbol, interval, range);
        Err(MarketDataError::NotSupported {
            operation: "history".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Free-text instrument search.
    ///
    /// Default implementation returns `NotSupported`.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }
}
