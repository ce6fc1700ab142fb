//! Provider capabilities.
//!
//! Describes which symbols a provider can quote and which optional
//! operations it implements.

use crate::models::SymbolClass;

/// Describes the capabilities of a market data provider.
///
/// Used by the aggregator to decide whether a provider is eligible for a
/// symbol before calling it.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Symbol classes this provider can quote.
    pub symbol_classes: &'static [SymbolClass],

    /// Whether the provider serves live quotes.
    pub supports_latest: bool,

    /// Whether the provider serves historical bars.
    pub supports_historical: bool,

    /// Whether the provider supports free-text symbol search.
    pub supports_search: bool,
}

impl ProviderCapabilities {
    pub fn handles(&self, class: SymbolClass) -> bool {
        self.symbol_classes.contains(&class)
    }
}
