//! Per-fetch diagnostics for provider fallback.

use std::time::Duration;

use crate::errors::ErrorKind;

/// Why a provider was skipped during fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Provider doesn't handle this symbol class (crypto pair vs listed).
    SymbolClassMismatch,

    /// Provider doesn't serve live quotes.
    LatestNotSupported,
}

/// Record of a single provider attempt during a fetch.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: &'static str,
    pub skipped: Option<SkipReason>,
    pub error: Option<(ErrorKind, String)>,
    pub success: bool,
    /// Time spent in the provider call (zero for skips).
    pub elapsed: Duration,
}

/// Ordered record of what the aggregator did for one symbol.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub symbol: String,
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, provider_id: &'static str, reason: SkipReason) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: Some(reason),
            error: None,
            success: false,
            elapsed: Duration::ZERO,
        });
    }

    pub fn record_error(
        &mut self,
        provider_id: &'static str,
        kind: ErrorKind,
        error: String,
        elapsed: Duration,
    ) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: Some((kind, error)),
            success: false,
            elapsed,
        });
    }

    pub fn record_success(&mut self, provider_id: &'static str, elapsed: Duration) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: None,
            success: true,
            elapsed,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                if a.success {
                    format!("{}: SUCCESS ({}ms)", a.provider_id, a.elapsed.as_millis())
                } else if let Some(skip) = &a.skipped {
                    format!("{}: SKIPPED ({:?})", a.provider_id, skip)
                } else if let Some((kind, err)) = &a.error {
                    format!("{}: ERROR [{}] ({})", a.provider_id, kind.code(), err)
                } else {
                    format!("{}: UNKNOWN", a.provider_id)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Provider that produced the quote, if any.
    pub fn winner(&self) -> Option<&'static str> {
        self.attempts
            .iter()
            .find(|a| a.success)
            .map(|a| a.provider_id)
    }

    pub fn has_success(&self) -> bool {
        self.winner().is_some()
    }

    /// Providers actually called (skips excluded).
    pub fn called(&self) -> Vec<&'static str> {
        self.attempts
            .iter()
            .filter(|a| a.skipped.is_none())
            .map(|a| a.provider_id)
            .collect()
    }

    pub fn skip_reasons(&self) -> Vec<(&'static str, &SkipReason)> {
        self.attempts
            .iter()
            .filter_map(|a| a.skipped.as_ref().map(|s| (a.provider_id, s)))
            .collect()
    }

    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_ref().map(|(_, e)| (a.provider_id, e.as_str())))
            .collect()
    }
}
