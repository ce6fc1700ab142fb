//! Remote search resolver - last stage before passthrough.
//!
//! Inputs that do not look like a ticker (anything outside
//! `[A-Z0-9-.=]` once uppercased, or longer than five bytes) are sent to a
//! provider's free-text search and the first hit is used.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::models::{CanonicalSymbol, ResolutionSource};
use crate::provider::MarketDataProvider;

lazy_static! {
    static ref TICKER_LIKE: Regex = Regex::new(r"^[A-Z0-9\-\.=]+$").unwrap();
}

const MAX_TICKER_LEN: usize = 5;

/// Whether the input should go to remote search.
pub fn needs_remote_search(input: &str) -> bool {
    !TICKER_LIKE.is_match(&input.to_uppercase()) || input.len() > MAX_TICKER_LEN
}

pub struct RemoteSearchResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl RemoteSearchResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, input: &str) -> Option<CanonicalSymbol> {
        if !needs_remote_search(input) {
            return None;
        }

        match self.provider.search(input).await {
            Ok(hits) => {
                let hit = hits.into_iter().next()?;
                debug!("Remote search resolved '{}' -> {}", input, hit.symbol);
                Some(CanonicalSymbol::new(hit.symbol, ResolutionSource::RemoteSearch))
            }
            Err(e) => {
                warn!(
                    "Remote search via {} failed for '{}': {}",
                    self.provider.id(),
                    input,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_remote_search() {
        assert!(!needs_remote_search("AAPL"));
        assert!(!needs_remote_search("gc=f"));
        assert!(!needs_remote_search("0700"));
        assert!(needs_remote_search("NVIDIA"));
        assert!(needs_remote_search("BTCUSDT"));
        assert!(needs_remote_search("腾讯控股"));
        assert!(needs_remote_search("^GSPC"));
        assert!(needs_remote_search("A B"));
    }
}
