//! Resolver chain - composite resolver that tries stages in order.
//!
//! The resolver chain is the main entry point for symbol resolution. Local
//! stages run first; the remote search stage (if configured) only runs when
//! every local stage missed.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::models::CanonicalSymbol;
use crate::provider::MarketDataProvider;

use super::alias_resolver::AliasResolver;
use super::catalog::SymbolCatalog;
use super::name_resolver::NameResolver;
use super::search_resolver::RemoteSearchResolver;
use super::suffix_resolver::SuffixResolver;
use super::traits::{Resolver, SymbolResolver};

/// Composite resolver that tries multiple stages in order.
///
/// The resolution order is:
/// 1. Alias table (`比特币` -> `BTCUSDT`)
/// 2. Name table (`贵州茅台` -> `600519.SS`)
/// 3. Custom stages added with [`add_resolver`](Self::add_resolver)
/// 4. Numeric suffix rules (`600519` -> `600519.SS`)
/// 5. Remote search (if a search provider is configured)
///
/// Nothing matching is not an error: the trimmed input is returned as-is.
///
/// # Example
///
/// ```ignore
/// let chain = ResolverChain::new(Arc::new(YahooProvider::new(&config)?));
///
/// let resolved = chain.resolve("黄金").await;
/// // resolved.as_str() == "GC=F"
/// // resolved.source() == ResolutionSource::Alias
/// ```
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
    suffix_resolver: SuffixResolver,
    remote: Option<RemoteSearchResolver>,
}

impl ResolverChain {
    /// Built-in tables plus remote search through `search_provider`.
    pub fn new(search_provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_catalog(SymbolCatalog::builtin().clone(), Some(search_provider))
    }

    /// Built-in tables only; unknown names pass through unchanged.
    pub fn local() -> Self {
        Self::with_catalog(SymbolCatalog::builtin().clone(), None)
    }

    pub fn with_catalog(
        catalog: SymbolCatalog,
        search_provider: Option<Arc<dyn MarketDataProvider>>,
    ) -> Self {
        Self {
            resolvers: vec![
                Box::new(AliasResolver::new(catalog.clone())),
                Box::new(NameResolver::new(catalog)),
            ],
            suffix_resolver: SuffixResolver::new(),
            remote: search_provider.map(RemoteSearchResolver::new),
        }
    }

    /// Add a custom stage to the chain.
    ///
    /// The stage is added before the suffix rules (which always run last
    /// among local stages).
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    fn resolve_local(&self, input: &str) -> Option<CanonicalSymbol> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.resolve(input))
            .or_else(|| self.suffix_resolver.resolve(input))
    }
}

#[async_trait]
impl SymbolResolver for ResolverChain {
    async fn resolve(&self, input: &str) -> CanonicalSymbol {
        let input = input.trim();

        if let Some(resolved) = self.resolve_local(input) {
            debug!(
                "Resolved '{}' -> {} ({:?})",
                input,
                resolved,
                resolved.source()
            );
            return resolved;
        }

        if let Some(remote) = &self.remote {
            if let Some(resolved) = remote.resolve(input).await {
                return resolved;
            }
        }

        CanonicalSymbol::passthrough(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MarketDataError;
    use crate::models::{Quote, ResolutionSource, SearchHit, SymbolClass};
    use crate::provider::ProviderCapabilities;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSearch {
        hits: Vec<SearchHit>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubSearch {
        fn returning(symbol: &str) -> Self {
            Self {
                hits: vec![SearchHit::new(symbol, "Stub", "NMS", "Equity")],
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                hits: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for StubSearch {
        fn id(&self) -> &'static str {
            "STUB"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                symbol_classes: &[SymbolClass::Listed],
                supports_latest: false,
                supports_historical: false,
                supports_search: true,
            }
        }

        async fn get_latest_quote(
            &self,
            symbol: &CanonicalSymbol,
        ) -> Result<Quote, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MarketDataError::Timeout {
                    provider: "STUB".to_string(),
                });
            }
            Ok(self.hits.clone())
        }
    }

    #[tokio::test]
    async fn test_chain_prefers_alias() {
        let search = Arc::new(StubSearch::returning("WRONG"));
        let chain = ResolverChain::new(search.clone());

        let resolved = chain.resolve("  比特币 ").await;
        assert_eq!(resolved.as_str(), "BTCUSDT");
        assert_eq!(resolved.source(), ResolutionSource::Alias);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_suffix_rules() {
        let chain = ResolverChain::local();
        assert_eq!(chain.resolve("600519").await.as_str(), "600519.SS");
        assert_eq!(chain.resolve("0700").await.as_str(), "0700.HK");
    }

    #[tokio::test]
    async fn test_chain_remote_search_for_names() {
        let search = Arc::new(StubSearch::returning("NVDA"));
        let chain = ResolverChain::new(search.clone());

        let resolved = chain.resolve("Nvidia Corp").await;
        assert_eq!(resolved.as_str(), "NVDA");
        assert_eq!(resolved.source(), ResolutionSource::RemoteSearch);
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chain_skips_search_for_tickers() {
        let search = Arc::new(StubSearch::returning("WRONG"));
        let chain = ResolverChain::new(search.clone());

        let resolved = chain.resolve("msft").await;
        assert_eq!(resolved.as_str(), "msft");
        assert_eq!(resolved.source(), ResolutionSource::Passthrough);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_search_failure_passes_through() {
        let chain = ResolverChain::new(Arc::new(StubSearch::failing()));

        let resolved = chain.resolve("某某不存在公司").await;
        assert_eq!(resolved.as_str(), "某某不存在公司");
        assert_eq!(resolved.source(), ResolutionSource::Passthrough);
    }

    #[tokio::test]
    async fn test_custom_stage_runs_before_suffix_rules() {
        struct Fixed;
        impl Resolver for Fixed {
            fn resolve(&self, input: &str) -> Option<CanonicalSymbol> {
                (input == "600519").then(|| CanonicalSymbol::passthrough("CUSTOM"))
            }
        }

        let mut chain = ResolverChain::local();
        chain.add_resolver(Box::new(Fixed));
        assert_eq!(chain.resolve("600519").await.as_str(), "CUSTOM");
    }
}
