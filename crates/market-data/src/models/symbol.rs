use std::fmt;

/// Quote currencies recognized as the second leg of an exchange crypto pair.
pub const CRYPTO_QUOTE_CURRENCIES: &[&str] = &["USDT", "USDC"];

/// How a canonical symbol was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionSource {
    /// Static alias table hit.
    Alias,
    /// Local name -> code table hit.
    NameTable,
    /// Numeric code suffixed with an exchange code.
    SuffixRule,
    /// First hit of a remote free-text search.
    RemoteSearch,
    /// Nothing matched; the input is used unchanged.
    Passthrough,
}

/// Coarse class of a symbol, used to pick eligible providers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SymbolClass {
    /// Exchange-style crypto pair such as `BTCUSDT` or `ETH-USDT`.
    CryptoPair,
    /// Anything a chart API understands: tickers, futures, FX, indices.
    Listed,
}

/// Symbol in the vocabulary of an upstream venue.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalSymbol {
    symbol: String,
    source: ResolutionSource,
}

impl CanonicalSymbol {
    pub fn new(symbol: impl Into<String>, source: ResolutionSource) -> Self {
        Self {
            symbol: symbol.into(),
            source,
        }
    }

    /// Wrap an already-canonical symbol (e.g. the index basket).
    pub fn passthrough(symbol: impl Into<String>) -> Self {
        Self::new(symbol, ResolutionSource::Passthrough)
    }

    pub fn as_str(&self) -> &str {
        &self.symbol
    }

    pub fn source(&self) -> ResolutionSource {
        self.source
    }

    /// Case-insensitive `USDT` suffix marks a crypto pair.
    pub fn is_crypto_pair(&self) -> bool {
        self.symbol.to_uppercase().ends_with("USDT")
    }

    pub fn class(&self) -> SymbolClass {
        if self.is_crypto_pair() {
            SymbolClass::CryptoPair
        } else {
            SymbolClass::Listed
        }
    }

    /// Symbol to use against the chart API.
    ///
    /// Exchange pairs are not listed there, so `BTCUSDT` / `BTC-USDT` map to
    /// the chart's `BTC-USD` series.
    pub fn chart_symbol(&self) -> String {
        if !self.is_crypto_pair() {
            return self.symbol.clone();
        }
        let upper = self.symbol.to_uppercase();
        let base = upper.trim_end_matches("USDT").trim_end_matches('-');
        format!("{}-USD", base)
    }
}

impl fmt::Display for CanonicalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
