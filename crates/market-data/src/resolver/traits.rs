//! Resolution traits for the market data crate.
//!
//! Defines the core abstractions for turning free-form user input into a
//! [`CanonicalSymbol`].

use async_trait::async_trait;

use crate::models::CanonicalSymbol;

/// Individual local stage in the resolution chain.
///
/// Stages are tried in order until one returns a symbol. Returning `None`
/// means this stage cannot handle the input and the chain should try the
/// next one. Local stages never touch the network.
pub trait Resolver: Send + Sync {
    /// Attempt to resolve trimmed, non-empty input.
    fn resolve(&self, input: &str) -> Option<CanonicalSymbol>;
}

/// Main symbol resolver interface.
///
/// Unlike [`Resolver::resolve`], this always produces a symbol: when nothing
/// matches, the input itself is returned unchanged.
#[async_trait]
pub trait SymbolResolver: Send + Sync {
    async fn resolve(&self, input: &str) -> CanonicalSymbol;
}
