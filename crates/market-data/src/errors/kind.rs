/// Coarse classification of a [`MarketDataError`](super::MarketDataError).
///
/// The aggregator treats every adapter-level kind as "try the next provider";
/// the classification exists so callers (tool layer, health check) can report
/// what went wrong without matching on every variant.
///
/// | Kind | Meaning |
/// |------|---------|
/// | `UnresolvedSymbol` | Venue has no instrument for the canonical symbol |
/// | `UpstreamUnavailable` | Transport failure, non-2xx status, timeout, rate limit |
/// | `InvalidData` | Venue answered but the payload is unusable |
/// | `TotalFailure` | Every provider in the chain failed |
/// | `Unavailable` | A secondary source (news, sentiment) has nothing to offer |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    UnresolvedSymbol,
    UpstreamUnavailable,
    InvalidData,
    TotalFailure,
    Unavailable,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnresolvedSymbol => "UNRESOLVED_SYMBOL",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorKind::InvalidData => "INVALID_DATA",
            ErrorKind::TotalFailure => "TOTAL_FAILURE",
            ErrorKind::Unavailable => "UNAVAILABLE",
        }
    }
}
