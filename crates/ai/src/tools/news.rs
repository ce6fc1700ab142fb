//! News tool - headlines by category keyword or free-text search.

use investor_market_data::{render, NewsItem};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::constants::MAX_NEWS_ITEMS;
use super::with_deadline;
use crate::env::AiEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the search_market_news tool.
#[derive(Debug, Deserialize)]
pub struct SearchMarketNewsArgs {
    /// Category ("us", "cn", "crypto", "macro", ...) or free-text query.
    #[serde(default)]
    pub query: String,
}

/// Output envelope for news tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMarketNewsOutput {
    pub news: Vec<NewsItem>,
    pub count: usize,
    pub markdown: String,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to search market news.
pub struct SearchMarketNewsTool<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> SearchMarketNewsTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AiEnvironment> Clone for SearchMarketNewsTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AiEnvironment + 'static> Tool for SearchMarketNewsTool<E> {
    const NAME: &'static str = "search_market_news";

    type Error = AiError;
    type Args = SearchMarketNewsArgs;
    type Output = SearchMarketNewsOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "搜索最新的市场新闻、宏观经济资讯或特定标的相关新闻".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "新闻分类 ('us', 'cn', 'crypto', 'macro', 'all') 或关键词，如 '英伟达财报'"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let query = match args.query.trim() {
            "" => "all",
            q => q,
        };

        let market_data = self.env.market_data();
        let mut news = with_deadline(
            Self::NAME,
            self.env.as_ref(),
            market_data.search_market_news(query),
        )
        .await?;
        news.truncate(MAX_NEWS_ITEMS);

        Ok(SearchMarketNewsOutput {
            count: news.len(),
            markdown: render::news_digest(&news),
            news,
        })
    }
}
