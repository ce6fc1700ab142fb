//! Search hit model for free-text symbol lookup.

use serde::{Deserialize, Serialize};

/// One hit from a provider's free-text instrument search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Provider symbol (e.g., "0700.HK")
    pub symbol: String,

    /// Display name, long name preferred over short name
    pub name: String,

    /// Exchange code as reported by the provider
    pub exchange: String,

    /// Type label (e.g., "Equity", "ETF", "Futures")
    pub kind: String,
}

impl SearchHit {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            kind: kind.into(),
        }
    }
}
