//! Constants for tool execution and bounded outputs.

/// Default per-call deadline for a market data tool, in seconds.
///
/// Covers the slowest fallback path: two crypto venues, the chart API and the
/// library client, each with its own 5-10 s timeout.
pub const DEFAULT_TOOL_DEADLINE_SECS: u64 = 30;

/// Maximum number of news items returned per tool call.
pub const MAX_NEWS_ITEMS: usize = 5;

/// Names of the market data tools, in registration order.
pub const MARKET_TOOLS: &[&str] = &[
    "get_market_quote",
    "search_market_news",
    "get_market_index",
    "get_security_analysis",
    "get_market_sentiment",
];

/// Values accepted by `get_security_analysis.asset_type`.
pub const ASSET_TYPES: &[&str] = &["stock", "crypto", "gold", "forex", "commodity"];

/// Values accepted by `get_market_sentiment.market`.
pub const SENTIMENT_MARKETS: &[&str] = &["crypto", "us_stock"];
