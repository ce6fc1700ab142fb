//! Quote tool - live quote for free-form symbol input using rig-core Tool trait.

use investor_market_data::{render, Quote};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::with_deadline;
use crate::env::AiEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the get_market_quote tool.
#[derive(Debug, Deserialize)]
pub struct GetMarketQuoteArgs {
    /// Ticker, alias, Chinese name or numeric code.
    pub symbol: String,
}

/// Output envelope for quote tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMarketQuoteOutput {
    pub quote: Quote,
    pub markdown: String,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to get a live quote.
pub struct GetMarketQuoteTool<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> GetMarketQuoteTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AiEnvironment> Clone for GetMarketQuoteTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AiEnvironment + 'static> Tool for GetMarketQuoteTool<E> {
    const NAME: &'static str = "get_market_quote";

    type Error = AiError;
    type Args = GetMarketQuoteArgs;
    type Output = GetMarketQuoteOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "获取指定标的的实时行情价格 (支持股票、加密货币、外汇、贵金属、期货)".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "代码或名称，如 'AAPL', 'BTCUSDT', '黄金', '贵州茅台', '600519', 'EURUSD=X'"
                    }
                },
                "required": ["symbol"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let symbol = args.symbol.trim();
        if symbol.is_empty() {
            return Err(AiError::invalid_input("symbol must not be empty"));
        }

        let market_data = self.env.market_data();
        let quote = with_deadline(
            Self::NAME,
            self.env.as_ref(),
            market_data.get_market_quote(symbol),
        )
        .await?;

        Ok(GetMarketQuoteOutput {
            markdown: render::quote_card(&quote),
            quote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockEnvironment, MockMarketData};

    #[tokio::test]
    async fn test_get_market_quote_tool() {
        let env = Arc::new(MockEnvironment::new());
        let tool = GetMarketQuoteTool::new(env);

        let output = tool
            .call(GetMarketQuoteArgs {
                symbol: "  AAPL ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.quote.symbol, "AAPL");
        assert_eq!(output.quote.change, 10.0);
        assert!(output.markdown.starts_with("📊 **AAPL 实时行情**"));
    }

    #[tokio::test]
    async fn test_unknown_symbol_surfaces_error_code() {
        let env = Arc::new(MockEnvironment::with_market_data(MockMarketData {
            unknown_symbols: vec!["ZZZZ".to_string()],
            ..Default::default()
        }));
        let tool = GetMarketQuoteTool::new(env);

        let err = tool
            .call(GetMarketQuoteArgs {
                symbol: "ZZZZ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "UNRESOLVED_SYMBOL");
    }

    #[tokio::test]
    async fn test_empty_symbol_is_invalid_input() {
        let tool = GetMarketQuoteTool::new(Arc::new(MockEnvironment::new()));
        let err = tool
            .call(GetMarketQuoteArgs {
                symbol: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_definition_requires_symbol() {
        let tool = GetMarketQuoteTool::new(Arc::new(MockEnvironment::new()));
        let definition = tool.definition(String::new()).await;
        assert_eq!(definition.name, "get_market_quote");
        assert_eq!(definition.parameters["required"][0], "symbol");
    }
}
