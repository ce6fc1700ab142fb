//! Tool layer error types.

use investor_market_data::MarketDataError;
use thiserror::Error;

/// Tool layer errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid tool arguments.
    #[error("{0}")]
    InvalidInput(String),

    /// Tool not found in the tool set.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The tool did not finish within its deadline.
    #[error("Tool timed out: {0}")]
    Timeout(String),

    /// Market data operation failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Tool output could not be serialized.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Error code for programmatic handling by the dispatch layer.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            AiError::Timeout(_) => "TOOL_TIMEOUT",
            AiError::MarketData(e) => e.kind().code(),
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_errors_keep_their_kind_code() {
        let err: AiError = MarketDataError::SymbolNotFound("ZZZZ".to_string()).into();
        assert_eq!(err.code(), "UNRESOLVED_SYMBOL");
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");

        let err: AiError = MarketDataError::AllProvidersFailed.into();
        assert_eq!(err.code(), "TOTAL_FAILURE");
    }

    #[test]
    fn test_codes() {
        assert_eq!(AiError::invalid_input("bad").code(), "INVALID_INPUT");
        assert_eq!(AiError::Timeout("get_market_quote".into()).code(), "TOOL_TIMEOUT");
        assert_eq!(AiError::internal("x").code(), "INTERNAL_ERROR");
    }
}
