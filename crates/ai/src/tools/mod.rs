//! AI assistant tools for market data access.
//!
//! This module provides tools that implement rig-core's Tool trait:
//! - GetMarketQuoteTool: Live quote for free-form symbol input
//! - SearchMarketNewsTool: News by category or keyword
//! - GetMarketIndexTool: Index/crypto/gold overview basket
//! - GetSecurityAnalysisTool: Technical indicators over daily history
//! - GetMarketSentimentTool: Fear & greed reading
//!
//! Every output carries the structured record plus a Markdown rendering.
//! All tools are designed to work with the AiEnvironment trait for
//! dependency injection.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod index;
pub mod news;
pub mod quote;
pub mod sentiment;

// Re-export constants
pub use constants::*;

// Re-export tools
pub use analysis::GetSecurityAnalysisTool;
pub use config::ToolConfig;
pub use index::GetMarketIndexTool;
pub use news::SearchMarketNewsTool;
pub use quote::GetMarketQuoteTool;
pub use sentiment::GetMarketSentimentTool;

use std::future::Future;
use std::sync::Arc;

use investor_market_data::MarketDataError;
use log::{debug, warn};

use crate::env::AiEnvironment;
use crate::error::AiError;

/// Container for all AI tools, simplifying tool registration across providers.
pub struct ToolSet<E: AiEnvironment> {
    pub quote: GetMarketQuoteTool<E>,
    pub news: SearchMarketNewsTool<E>,
    pub index: GetMarketIndexTool<E>,
    pub analysis: GetSecurityAnalysisTool<E>,
    pub sentiment: GetMarketSentimentTool<E>,
}

impl<E: AiEnvironment> ToolSet<E> {
    /// Create a new tool set with all market data tools.
    pub fn new(env: Arc<E>) -> Self {
        Self {
            quote: GetMarketQuoteTool::new(env.clone()),
            news: SearchMarketNewsTool::new(env.clone()),
            index: GetMarketIndexTool::new(env.clone()),
            analysis: GetSecurityAnalysisTool::new(env.clone()),
            sentiment: GetMarketSentimentTool::new(env),
        }
    }
}

/// Await a market data call under the environment's deadline.
///
/// Expiry drops `operation`, which cancels its in-flight HTTP request.
pub(crate) async fn with_deadline<T, F>(
    tool: &str,
    env: &impl AiEnvironment,
    operation: F,
) -> Result<T, AiError>
where
    F: Future<Output = Result<T, MarketDataError>>,
{
    let deadline = env.tool_config().deadline;
    debug!("Running tool {} (deadline {:?})", tool, deadline);

    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result.map_err(|e| {
            warn!("Tool {} failed [{}]: {}", tool, e.kind().code(), e);
            AiError::from(e)
        }),
        Err(_) => {
            warn!("Tool {} exceeded its {:?} deadline", tool, deadline);
            Err(AiError::Timeout(tool.to_string()))
        }
    }
}
