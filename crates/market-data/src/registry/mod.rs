//! Quote aggregation module.
//!
//! This module provides orchestration for market data providers, including:
//! - Ordered provider fallback for a single symbol
//! - Quote data validation
//! - Per-attempt fetch diagnostics

mod aggregator;
mod diagnostics;
mod validator;

pub use aggregator::QuoteAggregator;
pub use diagnostics::{FetchDiagnostics, ProviderAttempt, SkipReason};
pub use validator::{QuoteValidator, ValidationSeverity, ValidatorConfig};
