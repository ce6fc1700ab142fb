use serde::{Deserialize, Serialize};

/// Fear/greed style reading for one market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// "crypto" or "us_stock".
    pub market: String,
    /// 0 = extreme fear, 100 = extreme greed.
    pub score: f64,
    pub label: String,
    pub description: String,
    /// Unix seconds.
    pub timestamp: i64,
}

/// One entry of the market overview basket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Headline from a news feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    /// Feed title.
    pub source: String,
    /// Publication time as given by the feed.
    pub time: String,
}
