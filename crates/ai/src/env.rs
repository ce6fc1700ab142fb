//! Environment abstraction for the tool layer.
//!
//! The `AiEnvironment` trait hands tools their market data service and
//! per-call settings. The binary (or any host) implements it with a live
//! service; tests use the mock in `test_env`.

use std::sync::Arc;

use investor_market_data::MarketDataServiceTrait;

use crate::tools::ToolConfig;

/// Environment abstraction for the tools.
pub trait AiEnvironment: Send + Sync {
    /// Get the market data service behind every tool.
    fn market_data(&self) -> Arc<dyn MarketDataServiceTrait>;

    /// Per-call settings (deadline).
    fn tool_config(&self) -> ToolConfig;
}

/// Environment backed by a constructed market data service.
pub struct RuntimeEnvironment {
    market_data: Arc<dyn MarketDataServiceTrait>,
    tool_config: ToolConfig,
}

impl RuntimeEnvironment {
    pub fn new(market_data: Arc<dyn MarketDataServiceTrait>, tool_config: ToolConfig) -> Self {
        Self {
            market_data,
            tool_config,
        }
    }
}

impl AiEnvironment for RuntimeEnvironment {
    fn market_data(&self) -> Arc<dyn MarketDataServiceTrait> {
        self.market_data.clone()
    }

    fn tool_config(&self) -> ToolConfig {
        self.tool_config.clone()
    }
}
