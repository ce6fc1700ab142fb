//! Quote aggregator for orchestrating market data providers.
//!
//! The aggregator owns an ordered provider chain and handles:
//! - Symbol resolution for raw user input
//! - Provider selection by symbol class and capability
//! - Sequential fallback to the next provider on any failure
//! - Quote validation
//! - Per-attempt diagnostics

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use super::diagnostics::{FetchDiagnostics, SkipReason};
use super::validator::QuoteValidator;
use crate::errors::MarketDataError;
use crate::models::{Bar, CanonicalSymbol, Quote};
use crate::provider::MarketDataProvider;
use crate::resolver::SymbolResolver;

/// Ordered-fallback quote aggregator.
pub struct QuoteAggregator {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    resolver: Arc<dyn SymbolResolver>,
    validator: QuoteValidator,
}

impl QuoteAggregator {
    /// Create a new aggregator.
    ///
    /// `providers` are tried in the given order.
    pub fn new(
        providers: Vec<Arc<dyn MarketDataProvider>>,
        resolver: Arc<dyn SymbolResolver>,
    ) -> Self {
        Self::with_validator(providers, resolver, QuoteValidator::new())
    }

    pub fn with_validator(
        providers: Vec<Arc<dyn MarketDataProvider>>,
        resolver: Arc<dyn SymbolResolver>,
        validator: QuoteValidator,
    ) -> Self {
        Self {
            providers,
            resolver,
            validator,
        }
    }

    /// Resolve raw input and fetch its latest quote.
    pub async fn get_quote(&self, raw: &str) -> Result<Quote, MarketDataError> {
        self.get_quote_with_diagnostics(raw).await.0
    }

    /// Like [`get_quote`](Self::get_quote), also returning what every
    /// provider did.
    pub async fn get_quote_with_diagnostics(
        &self,
        raw: &str,
    ) -> (Result<Quote, MarketDataError>, FetchDiagnostics) {
        let symbol = self.resolve(raw).await;
        self.fetch_with_diagnostics(&symbol).await
    }

    /// Resolve raw input without fetching.
    pub async fn resolve(&self, raw: &str) -> CanonicalSymbol {
        self.resolver.resolve(raw).await
    }

    /// Fetch the latest quote for an already-resolved symbol.
    pub async fn fetch_latest_quote(
        &self,
        symbol: &CanonicalSymbol,
    ) -> Result<Quote, MarketDataError> {
        self.fetch_with_diagnostics(symbol).await.0
    }

    /// Fetch the latest quote for a symbol, recording every attempt.
    ///
    /// Tries providers in order:
    /// 1. Skip providers that don't handle the symbol class
    /// 2. Skip providers without live quotes
    /// 3. Fetch and validate
    /// 4. On any failure, try the next provider
    ///
    /// On total failure the last provider error is returned, or
    /// `AllProvidersFailed` when nothing was called.
    pub async fn fetch_with_diagnostics(
        &self,
        symbol: &CanonicalSymbol,
    ) -> (Result<Quote, MarketDataError>, FetchDiagnostics) {
        let mut diagnostics = FetchDiagnostics::new(symbol.as_str());

        if self.providers.is_empty() {
            warn!("No providers registered, cannot quote {}", symbol);
            return (Err(MarketDataError::NoProvidersAvailable), diagnostics);
        }

        let class = symbol.class();
        let mut last_error: Option<MarketDataError> = None;

        for provider in &self.providers {
            let provider_id = provider.id();
            let capabilities = provider.capabilities();

            if !capabilities.handles(class) {
                diagnostics.record_skip(provider_id, SkipReason::SymbolClassMismatch);
                continue;
            }
            if !capabilities.supports_latest {
                diagnostics.record_skip(provider_id, SkipReason::LatestNotSupported);
                continue;
            }

            debug!("Fetching {} from provider '{}'", symbol, provider_id);

            let started = Instant::now();
            let result = provider
                .get_latest_quote(symbol)
                .await
                .and_then(|quote| self.validator.validate(&quote).map(|_| quote));
            let elapsed = started.elapsed();

            match result {
                Ok(quote) => {
                    diagnostics.record_success(provider_id, elapsed);
                    info!(
                        "Quoted {} from '{}' in {}ms",
                        symbol,
                        provider_id,
                        elapsed.as_millis()
                    );
                    return (Ok(quote), diagnostics);
                }
                Err(e) => {
                    info!(
                        "Provider '{}' failed for {} with {:?}, trying next provider",
                        provider_id, symbol, e
                    );
                    diagnostics.record_error(provider_id, e.kind(), e.to_string(), elapsed);
                    last_error = Some(e);
                }
            }
        }

        debug!("Fetch diagnostics for {}: {}", symbol, diagnostics.summary());
        (
            Err(last_error.unwrap_or(MarketDataError::AllProvidersFailed)),
            diagnostics,
        )
    }

    /// Fetch a bar series from the first provider serving history.
    ///
    /// `symbol` must already be in the history provider's vocabulary
    /// (see [`CanonicalSymbol::chart_symbol`]).
    pub async fn fetch_history(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let mut last_error: Option<MarketDataError> = None;

        for provider in self
            .providers
            .iter()
            .filter(|p| p.capabilities().supports_historical)
        {
            match provider.get_historical_bars(symbol, interval, range).await {
                Ok(bars) => return Ok(bars),
                Err(e) => {
                    warn!(
                        "History for {} from '{}' failed: {}",
                        symbol,
                        provider.id(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(MarketDataError::NoProvidersAvailable))
    }

    /// Get the list of registered providers.
    pub fn providers(&self) -> &[Arc<dyn MarketDataProvider>] {
        &self.providers
    }
}
