//! Sentiment tool - fear & greed style reading per market.

use investor_market_data::{render, Sentiment};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::constants::SENTIMENT_MARKETS;
use super::with_deadline;
use crate::env::AiEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

fn default_market() -> String {
    "crypto".to_string()
}

/// Arguments for the get_market_sentiment tool.
#[derive(Debug, Deserialize)]
pub struct GetMarketSentimentArgs {
    #[serde(default = "default_market")]
    pub market: String,
}

/// Output envelope for sentiment tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMarketSentimentOutput {
    pub sentiment: Sentiment,
    pub markdown: String,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to read market sentiment.
pub struct GetMarketSentimentTool<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> GetMarketSentimentTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AiEnvironment> Clone for GetMarketSentimentTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AiEnvironment + 'static> Tool for GetMarketSentimentTool<E> {
    const NAME: &'static str = "get_market_sentiment";

    type Error = AiError;
    type Args = GetMarketSentimentArgs;
    type Output = GetMarketSentimentOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "获取市场情绪指标 (加密货币恐惧贪婪指数或美股情绪)".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "market": {
                        "type": "string",
                        "enum": SENTIMENT_MARKETS,
                        "default": "crypto",
                        "description": "市场类型"
                    }
                },
                "required": []
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let market = args.market.trim().to_lowercase();
        let market = if market.is_empty() {
            default_market()
        } else {
            market
        };

        let market_data = self.env.market_data();
        let sentiment = with_deadline(
            Self::NAME,
            self.env.as_ref(),
            market_data.get_market_sentiment(&market),
        )
        .await?;

        Ok(GetMarketSentimentOutput {
            markdown: render::sentiment_card(&sentiment),
            sentiment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::MockEnvironment;

    #[tokio::test]
    async fn test_get_market_sentiment_tool() {
        let tool = GetMarketSentimentTool::new(Arc::new(MockEnvironment::new()));

        let output = tool
            .call(GetMarketSentimentArgs {
                market: "US_STOCK".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.sentiment.market, "us_stock");
        assert_eq!(output.sentiment.label, "Greed");
        assert!(output.markdown.contains("🔥 指数: 61 | Greed"));
    }

    #[tokio::test]
    async fn test_market_defaults_to_crypto() {
        let args: GetMarketSentimentArgs = serde_json::from_str("{}").unwrap();
        assert_eq!(args.market, "crypto");

        let tool = GetMarketSentimentTool::new(Arc::new(MockEnvironment::new()));
        let output = tool.call(args).await.unwrap();
        assert_eq!(output.sentiment.market, "crypto");
    }
}
