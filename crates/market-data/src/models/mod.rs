//! Market data models
//!
//! This module contains the request-scoped value types:
//! - `symbol` - Canonical symbol produced by the resolver
//! - `quote` - Normalized live quote
//! - `bar` - Historical bar
//! - `analysis` - Technical analysis snapshot, asset type and trend labels
//! - `market` - Sentiment, index basket entries and news items
//! - `search` - Free-text search hits

mod analysis;
mod bar;
mod market;
mod quote;
mod search;
mod symbol;

pub use analysis::{AssetType, SecurityAnalysis, Trend};
pub use bar::Bar;
pub use market::{IndexQuote, NewsItem, Sentiment};
pub use quote::Quote;
pub use search::SearchHit;
pub use symbol::{CanonicalSymbol, ResolutionSource, SymbolClass, CRYPTO_QUOTE_CURRENCIES};
