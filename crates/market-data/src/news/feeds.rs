//! News category table and free-text feed URLs.

use urlencoding::encode;

const MARKETWATCH_TOP: &str = "https://feeds.content.dowjones.io/public/rss/mw_topstories";
const GOOGLE_NEWS_A_SHARES: &str =
    "https://news.google.com/rss/search?q=A%E8%82%A1&hl=zh-CN&gl=CN&ceid=CN:zh-CN";
const CNBC_ECONOMY: &str =
    "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=20910258";
const WSJ_US_BUSINESS: &str = "https://feeds.a.dj.com/rss/WSJcomUSBusiness.xml";
const COINTELEGRAPH: &str = "https://cointelegraph.com/rss";
const CNBC_TOP_NEWS: &str =
    "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000664";
const GOOGLE_NEWS_CRYPTO: &str = "https://news.google.com/rss/search?q=%E5%8A%A0%E5%AF%86%E8%B4%A7%E5%B8%81&hl=zh-CN&gl=CN&ceid=CN:zh-CN";

/// Named categories accepted by `search_market_news`.
pub const CATEGORIES: &[&str] = &[
    "us", "all", "reuters", "us_stock", "cn", "cn_stock", "macro", "us_macro", "wsj_econ",
    "crypto", "theblock", "bloomberg", "panews",
];

/// Fixed feed for a named category.
pub fn category_feed(category: &str) -> Option<&'static str> {
    let url = match category {
        "us" | "all" | "reuters" | "us_stock" => MARKETWATCH_TOP,
        "cn" | "cn_stock" => GOOGLE_NEWS_A_SHARES,
        "macro" | "us_macro" => CNBC_ECONOMY,
        "wsj_econ" => WSJ_US_BUSINESS,
        "crypto" | "theblock" => COINTELEGRAPH,
        "bloomberg" => CNBC_TOP_NEWS,
        "panews" => GOOGLE_NEWS_CRYPTO,
        _ => return None,
    };
    Some(url)
}

fn has_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c))
}

/// Google News search feed; Chinese edition when the query has CJK ideographs.
pub fn search_feed(query: &str) -> String {
    let (hl, gl, ceid) = if has_cjk(query) {
        ("zh-CN", "CN", "CN:zh-CN")
    } else {
        ("en-US", "US", "US:en")
    };
    format!(
        "https://news.google.com/rss/search?q={}&hl={}&gl={}&ceid={}",
        encode(query),
        hl,
        gl,
        ceid
    )
}

/// Category feed, else a search feed for the raw query.
pub fn feed_url(query: &str) -> String {
    category_feed(query)
        .map(str::to_string)
        .unwrap_or_else(|| search_feed(query))
}
