//! Security analysis tool - technical indicators over daily history.

use investor_market_data::{render, AssetType, SecurityAnalysis};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::constants::ASSET_TYPES;
use super::with_deadline;
use crate::env::AiEnvironment;
use crate::error::AiError;

// ============================================================================
// Tool Arguments and Output
// ============================================================================

/// Arguments for the get_security_analysis tool.
#[derive(Debug, Deserialize)]
pub struct GetSecurityAnalysisArgs {
    pub symbol: String,
    /// Asset class tag, defaults to stock.
    #[serde(default)]
    pub asset_type: AssetType,
}

/// Output envelope for analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSecurityAnalysisOutput {
    pub analysis: SecurityAnalysis,
    pub markdown: String,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Tool to run a technical analysis of a security.
pub struct GetSecurityAnalysisTool<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> GetSecurityAnalysisTool<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }
}

impl<E: AiEnvironment> Clone for GetSecurityAnalysisTool<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }
}

impl<E: AiEnvironment + 'static> Tool for GetSecurityAnalysisTool<E> {
    const NAME: &'static str = "get_security_analysis";

    type Error = AiError;
    type Args = GetSecurityAnalysisArgs;
    type Output = GetSecurityAnalysisOutput;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "获取指定标的的深度技术分析 (均线、RSI、量比、支撑压力位、趋势判断)".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "代码或名称，如 'AAPL', 'BTC-USD', '黄金', '腾讯'"
                    },
                    "asset_type": {
                        "type": "string",
                        "enum": ASSET_TYPES,
                        "default": "stock",
                        "description": "资产类型"
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
        let analysis = with_deadline(
            Self::NAME,
            self.env.as_ref(),
            market_data.get_security_analysis(symbol, args.asset_type),
        )
        .await?;

        Ok(GetSecurityAnalysisOutput {
            markdown: render::security_analysis_card(&analysis),
            analysis,
        })
    }
}
