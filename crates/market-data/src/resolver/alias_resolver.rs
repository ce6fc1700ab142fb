//! Alias resolver - static nickname table.
//!
//! First stage of the chain. Matches common names in Chinese and English
//! (`比特币`, `gold`, `纳指`, `usdjpy`) case-insensitively against the catalog.

use crate::models::{CanonicalSymbol, ResolutionSource};

use super::catalog::SymbolCatalog;
use super::traits::Resolver;

pub struct AliasResolver {
    catalog: SymbolCatalog,
}

impl AliasResolver {
    pub fn new(catalog: SymbolCatalog) -> Self {
        Self { catalog }
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new(SymbolCatalog::builtin().clone())
    }
}

impl Resolver for AliasResolver {
    fn resolve(&self, input: &str) -> Option<CanonicalSymbol> {
        self.catalog
            .alias(input)
            .map(|symbol| CanonicalSymbol::new(symbol, ResolutionSource::Alias))
    }
}
