//! JSON-driven alias and name tables.
//!
//! Loads `symbols.json` at compile time via `include_str!` and parses it once
//! via `lazy_static`. Callers that need extra entries clone the built-in
//! catalog and extend it.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    aliases: HashMap<String, String>,
    names: Vec<NameEntry>,
}

/// Local company name -> exchange code.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
    pub symbol: String,
}

/// Alias table (case-insensitive keys) and ordered name table.
#[derive(Clone, Debug, Default)]
pub struct SymbolCatalog {
    aliases: HashMap<String, String>,
    names: Vec<NameEntry>,
}

lazy_static! {
    static ref BUILTIN: SymbolCatalog =
        SymbolCatalog::from_json(include_str!("symbols.json")).expect("symbols.json must be valid");
}

impl SymbolCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static SymbolCatalog {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self {
            aliases: HashMap::with_capacity(file.aliases.len()),
            names: file.names,
        };
        for (alias, symbol) in file.aliases {
            catalog.insert_alias(&alias, symbol);
        }
        Ok(catalog)
    }

    pub fn with_alias(mut self, alias: &str, symbol: impl Into<String>) -> Self {
        self.insert_alias(alias, symbol);
        self
    }

    /// Appends a name entry; earlier entries win ties.
    pub fn with_name(mut self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.names.push(NameEntry {
            name: name.into(),
            symbol: symbol.into(),
        });
        self
    }

    fn insert_alias(&mut self, alias: &str, symbol: impl Into<String>) {
        self.aliases.insert(alias.to_lowercase(), symbol.into());
    }

    /// Exact, case-insensitive alias lookup.
    pub fn alias(&self, input: &str) -> Option<&str> {
        self.aliases.get(&input.to_lowercase()).map(String::as_str)
    }

    pub fn names(&self) -> &[NameEntry] {
        &self.names
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let catalog = SymbolCatalog::builtin();
        assert!(catalog.alias_count() > 150);
        assert!(!catalog.names().is_empty());
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let catalog = SymbolCatalog::builtin();
        assert_eq!(catalog.alias("BTC"), Some("BTCUSDT"));
        assert_eq!(catalog.alias("Gold"), Some("GC=F"));
        assert_eq!(catalog.alias("比特币"), Some("BTCUSDT"));
        assert_eq!(catalog.alias("unknown"), None);
    }

    #[test]
    fn test_corrected_currency_aliases() {
        let catalog = SymbolCatalog::builtin();
        assert_eq!(catalog.alias("瑞郎"), Some("CHF=X"));
        assert_eq!(catalog.alias("韩元"), Some("KRW=X"));
        assert_eq!(catalog.alias("越南盾"), Some("VND=X"));
    }

    #[test]
    fn test_extend_catalog() {
        let catalog = SymbolCatalog::builtin()
            .clone()
            .with_alias("DOGE", "DOGEUSDT")
            .with_name("测试公司", "TEST");
        assert_eq!(catalog.alias("doge"), Some("DOGEUSDT"));
        assert_eq!(catalog.names().last().map(|e| e.symbol.as_str()), Some("TEST"));
    }
}
