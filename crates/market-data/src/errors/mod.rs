//! Error types and classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`ErrorKind`]: Coarse classification used for reporting

mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The venue has no instrument for the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The venue answered but price and previous close are both zero.
    #[error("Invalid price data (0.0) for symbol: {0}")]
    InvalidPriceData(String),

    /// A quote failed sanity validation.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Joined validation messages
        message: String,
    },

    /// No bars available for the requested interval/range.
    #[error("No data for range: {0}")]
    NoDataForRange(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-2xx status, venue error code).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider payload could not be decoded.
    #[error("Parse error: {provider} - {message}")]
    ParseError {
        /// The provider whose payload failed to decode
        provider: String,
        /// Decoder message
        message: String,
    },

    /// The provider does not implement the requested operation.
    #[error("{operation} not supported by {provider}")]
    NotSupported {
        /// Operation name (e.g. "search", "history")
        operation: String,
        /// The provider
        provider: String,
    },

    /// Sentiment could not be derived for the market.
    #[error("Sentiment data not available for {0}")]
    SentimentUnavailable(String),

    /// News feed could not be fetched or parsed.
    #[error("Failed to fetch news: {0}")]
    NewsUnavailable(String),

    /// No provider in the chain can handle the symbol.
    #[error("No providers available")]
    NoProvidersAvailable,

    /// Every provider was tried and none produced a quote.
    #[error("All providers failed")]
    AllProvidersFailed,

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the coarse classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use investor_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::RateLimited { provider: "BINANCE".to_string() };
    /// assert_eq!(error.kind(), ErrorKind::UpstreamUnavailable);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.kind(), ErrorKind::UnresolvedSymbol);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SymbolNotFound(_) => ErrorKind::UnresolvedSymbol,

            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::NotSupported { .. }
            | Self::Network(_) => ErrorKind::UpstreamUnavailable,

            Self::InvalidPriceData(_)
            | Self::ValidationFailed { .. }
            | Self::ParseError { .. }
            | Self::NoDataForRange(_) => ErrorKind::InvalidData,

            Self::NoProvidersAvailable | Self::AllProvidersFailed => ErrorKind::TotalFailure,

            Self::SentimentUnavailable(_) | Self::NewsUnavailable(_) => ErrorKind::Unavailable,
        }
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn parse(provider: &str, message: impl Into<String>) -> Self {
        Self::ParseError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
