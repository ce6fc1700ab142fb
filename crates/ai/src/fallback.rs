//! Rule-based answers for when the model is unreachable.
//!
//! Handles the two request shapes that need no reasoning: a bare symbol
//! (optionally wrapped in "查一下 ... 价格" style phrasing) and a news request.

use std::fmt::Display;
use std::sync::Arc;

use investor_market_data::render;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::env::AiEnvironment;

static LEADING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(查一下|看看|查询|分析|价格|行情|报价|走势|股价)\s*").expect("valid regex")
});

static TRAILING_NOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(价格|行情|报价|走势|股价)$").expect("valid regex"));

/// Keyword matcher over the market data service.
pub struct KeywordFallback<E: AiEnvironment> {
    env: Arc<E>,
}

impl<E: AiEnvironment> KeywordFallback<E> {
    pub fn new(env: Arc<E>) -> Self {
        Self { env }
    }

    /// Answer `text` without the model. Always yields a message; when nothing
    /// matches it apologizes and carries `original_error`.
    pub async fn respond(&self, text: &str, original_error: &(dyn Display + Sync)) -> String {
        let market_data = self.env.market_data();

        let symbol = strip_phrasing(text);
        if !symbol.is_empty() {
            match market_data.get_market_quote(&symbol).await {
                Ok(quote) => return render::quote_card(&quote),
                Err(e) => debug!("Fallback quote for '{}' failed: {}", symbol, e),
            }
        }

        if let Some(category) = news_category(text) {
            match market_data.search_market_news(category).await {
                Ok(news) if !news.is_empty() => return render::news_digest(&news),
                Ok(_) => debug!("Fallback news for '{}' came back empty", category),
                Err(e) => warn!("Fallback news for '{}' failed: {}", category, e),
            }
        }

        format!(
            "抱歉，AI 服务暂时不可用，且无法识别您的指令启动降级模式。\n错误信息: {}",
            original_error
        )
    }
}

fn strip_phrasing(text: &str) -> String {
    let text = LEADING_VERB.replace(text.trim(), "");
    TRAILING_NOUN.replace(&text, "").trim().to_string()
}

/// News category for a request mentioning 新闻/资讯. Later keywords win.
fn news_category(text: &str) -> Option<&'static str> {
    if !text.contains("新闻") && !text.contains("资讯") {
        return None;
    }

    let mut category = "all";
    if text.contains("宏观") {
        category = "macro";
    }
    if text.contains("加密") || text.contains('币') {
        category = "crypto";
    }
    if text.contains("美股") {
        category = "us";
    }
    if text.contains("A股") {
        category = "cn";
    }
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_env::{MockEnvironment, MockMarketData};
    use investor_market_data::NewsItem;

    #[test]
    fn test_strip_phrasing() {
        assert_eq!(strip_phrasing("查一下 AAPL 价格"), "AAPL");
        assert_eq!(strip_phrasing("  黄金行情 "), "黄金");
        assert_eq!(strip_phrasing("行情"), "");
        assert_eq!(strip_phrasing("BTCUSDT"), "BTCUSDT");
    }

    #[test]
    fn test_news_category() {
        assert_eq!(news_category("今天的宏观新闻"), Some("macro"));
        assert_eq!(news_category("比特币资讯"), Some("crypto"));
        assert_eq!(news_category("美股新闻"), Some("us"));
        assert_eq!(news_category("宏观和A股新闻"), Some("cn"));
        assert_eq!(news_category("有什么新闻"), Some("all"));
        assert_eq!(news_category("你好"), None);
    }

    #[tokio::test]
    async fn test_symbol_request_returns_quote_card() {
        let fallback = KeywordFallback::new(Arc::new(MockEnvironment::new()));
        let answer = fallback.respond("查一下 AAPL 价格", &"upstream 503").await;
        assert!(answer.starts_with("📊 **AAPL 实时行情**"));
    }

    #[tokio::test]
    async fn test_news_request_returns_digest() {
        let env = Arc::new(MockEnvironment::with_market_data(MockMarketData {
            unknown_symbols: vec!["美股新闻".to_string()],
            news: vec![NewsItem {
                title: "Stocks rally".to_string(),
                source: "Wire".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }));
        let fallback = KeywordFallback::new(env.clone());

        let answer = fallback.respond("美股新闻", &"upstream 503").await;

        assert!(answer.contains("• **Stocks rally**"));
        let queries = env.market_data.news_queries.lock().unwrap();
        assert_eq!(queries.as_slice(), ["us".to_string()]);
    }

    #[tokio::test]
    async fn test_unmatched_request_apologizes_with_error() {
        let env = Arc::new(MockEnvironment::with_market_data(MockMarketData {
            unknown_symbols: vec!["帮我写首诗".to_string()],
            ..Default::default()
        }));
        let fallback = KeywordFallback::new(env);

        let answer = fallback.respond("帮我写首诗", &"model offline").await;

        assert!(answer.starts_with("抱歉，AI 服务暂时不可用"));
        assert!(answer.ends_with("错误信息: model offline"));
    }
}
