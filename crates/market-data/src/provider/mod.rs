//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all venue adapters implement
//! - Provider capabilities used by the aggregator to skip ineligible venues
//! - Concrete providers (Yahoo chart, OKX, Binance, library Yahoo client)
//!
//! # Provider chain
//!
//! The default chain tries crypto exchanges first (they only accept exchange
//! pairs such as `BTCUSDT`), then the chart API, then the library client:
//!
//! ```text
//! OKX -> BINANCE -> YAHOO -> LEGACY
//! ```

mod capabilities;
pub(crate) mod http;
mod traits;

pub mod binance;
pub mod legacy;
pub mod okx;
pub mod yahoo;

use std::sync::Arc;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use traits::MarketDataProvider;

/// Build the default provider chain in fallback order.
pub fn default_providers(
    config: &MarketDataConfig,
) -> Result<Vec<Arc<dyn MarketDataProvider>>, MarketDataError> {
    Ok(vec![
        Arc::new(okx::OkxProvider::new(config)?),
        Arc::new(binance::BinanceProvider::new(config)?),
        Arc::new(yahoo::YahooProvider::new(config)?),
        Arc::new(legacy::LegacyYahooProvider::new(config)?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        let providers = default_providers(&MarketDataConfig::default()).unwrap();
        let ids: Vec<&str> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["OKX", "BINANCE", "YAHOO", "LEGACY"]);
    }
}
