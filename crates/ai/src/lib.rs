//! Investor AI - market data tools for rig-core agents.
//!
//! This crate exposes the market data service to an LLM as five tools and
//! offers a keyword fallback for when the model is unreachable.
//!
//! # Architecture
//!
//! - `tools`: Tool set, argument schemas, per-call deadline
//! - `env`: Environment abstraction handing tools their market data service
//! - `fallback`: Rule-based quote/news answers without a model
//! - `error`: Tool error type with stable error codes
//!
//! # Example
//!
//! ```ignore
//! use investor_ai::{RuntimeEnvironment, ToolConfig, ToolSet};
//! use investor_market_data::{MarketDataConfig, MarketDataService};
//!
//! let service = MarketDataService::from_config(&MarketDataConfig::from_env())?;
//! let env = Arc::new(RuntimeEnvironment::new(Arc::new(service), ToolConfig::from_env()));
//!
//! let tools = ToolSet::new(env);
//! let agent = client
//!     .agent(model)
//!     .tool(tools.quote)
//!     .tool(tools.news)
//!     .tool(tools.index)
//!     .tool(tools.analysis)
//!     .tool(tools.sentiment)
//!     .build();
//! ```

pub mod env;
pub mod error;
pub mod fallback;
pub mod tools;

// Re-export main types for convenience
pub use env::{AiEnvironment, RuntimeEnvironment};
pub use error::AiError;
pub use fallback::KeywordFallback;
pub use tools::{
    GetMarketIndexTool, GetMarketQuoteTool, GetMarketSentimentTool, GetSecurityAnalysisTool,
    SearchMarketNewsTool, ToolConfig, ToolSet, ASSET_TYPES, DEFAULT_TOOL_DEADLINE_SECS,
    MARKET_TOOLS, MAX_NEWS_ITEMS, SENTIMENT_MARKETS,
};
