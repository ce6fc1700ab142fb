//! Index tool - overview of the configured index basket.

use investor_market_data::{render, IndexQuote};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::with_deadline;
use crate::env::AiEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the get_market_index tool (none).
#[derive(Debug, Default, Deserialize)]
pub struct GetMarketIndexArgs {}

/// Output envelope for index tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMarketIndexOutput {
    pub indices: Vec<IndexQuote>,
    pub markdown: String,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to get the global market overview.
pub struct GetMarketIndexTool<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> GetMarketIndexTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AiEnvironment> Clone for GetMarketIndexTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AiEnvironment + 'static> Tool for GetMarketIndexTool<E> {
    const NAME: &'static str = "get_market_index";

    type Error = AiError;
    type Args = GetMarketIndexArgs;
    type Output = GetMarketIndexOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "获取全球主要市场指数概览 (标普500、纳斯达克、比特币、黄金等)".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let market_data = self.env.market_data();
        let indices = with_deadline(
            Self::NAME,
            self.env.as_ref(),
            market_data.get_market_index(),
        )
        .await?;

        Ok(GetMarketIndexOutput {
            markdown: render::index_board(&indices),
            indices,
        })
    }
}
