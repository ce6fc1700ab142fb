//! Symbol resolution for user input.
//!
//! This module converts free-form names (`比特币`, `gold`, `贵州茅台`, `0700`)
//! into the symbols the venues understand (`BTCUSDT`, `GC=F`, `600519.SS`,
//! `0700.HK`).
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ResolverChain                           │
//! │                                                              │
//! │  1. AliasResolver    case-insensitive nickname table         │
//! │           │ miss                                             │
//! │  2. NameResolver     company names, exact then containment   │
//! │           │ miss                                             │
//! │  3. SuffixResolver   6 digits -> .SS/.SZ, 4 digits -> .HK    │
//! │           │ miss                                             │
//! │  4. RemoteSearch     first hit of a provider search          │
//! │           │ miss / error                                     │
//! │  5. Passthrough      input unchanged                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution never fails; a failed lookup surfaces later as a quote error.

mod alias_resolver;
mod catalog;
mod chain;
mod name_resolver;
mod search_resolver;
mod suffix_resolver;
mod traits;

// Re-export main types
pub use alias_resolver::AliasResolver;
pub use catalog::{NameEntry, SymbolCatalog};
pub use chain::ResolverChain;
pub use name_resolver::NameResolver;
pub use search_resolver::{needs_remote_search, RemoteSearchResolver};
pub use suffix_resolver::SuffixResolver;
pub use traits::{Resolver, SymbolResolver};
