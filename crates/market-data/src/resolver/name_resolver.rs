//! Name resolver - local company name table.
//!
//! Exact match first. Inputs longer than three bytes also match by
//! containment in either direction, so `茅台股份` and `贵州茅台` both hit the
//! `贵州茅台` entry. Among several containment hits the longest name wins,
//! then table order.

use crate::models::{CanonicalSymbol, ResolutionSource};

use super::catalog::{NameEntry, SymbolCatalog};
use super::traits::Resolver;

/// Minimum input length (bytes) before substring matching kicks in.
const MIN_FUZZY_LEN: usize = 3;

pub struct NameResolver {
    catalog: SymbolCatalog,
}

impl NameResolver {
    pub fn new(catalog: SymbolCatalog) -> Self {
        Self { catalog }
    }

    fn fuzzy_match(&self, input: &str) -> Option<&NameEntry> {
        self.catalog
            .names()
            .iter()
            .filter(|entry| entry.name.contains(input) || input.contains(entry.name.as_str()))
            .fold(None, |best: Option<&NameEntry>, entry| match best {
                Some(b) if b.name.len() >= entry.name.len() => Some(b),
                _ => Some(entry),
            })
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(SymbolCatalog::builtin().clone())
    }
}

impl Resolver for NameResolver {
    fn resolve(&self, input: &str) -> Option<CanonicalSymbol> {
        let names = self.catalog.names();

        let entry = names
            .iter()
            .find(|entry| entry.name == input)
            .or_else(|| {
                if input.len() > MIN_FUZZY_LEN {
                    self.fuzzy_match(input)
                } else {
                    None
                }
            })?;

        Some(CanonicalSymbol::new(
            entry.symbol.clone(),
            ResolutionSource::NameTable,
        ))
    }
}
