//! Market news from public RSS/Atom feeds.

pub mod feeds;
pub mod rss;

use reqwest::Client;
use tracing::debug;

use crate::config::MarketDataConfig;
use crate::errors::MarketDataError;
use crate::models::NewsItem;
use crate::provider::http;

pub use feeds::{category_feed, feed_url, search_feed, CATEGORIES};

const SOURCE_NAME: &str = "NEWS";

/// Fetches a feed and flattens its first items into [`NewsItem`]s.
pub struct NewsFetcher {
    client: Client,
    limit: usize,
    summary_chars: usize,
}

impl NewsFetcher {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: http::build_client(SOURCE_NAME, &config.user_agent, config.news_timeout)?,
            limit: config.news_limit,
            summary_chars: config.news_summary_chars,
        })
    }

    /// News for a category name or free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<NewsItem>, MarketDataError> {
        self.fetch_feed(&feed_url(query.trim())).await
    }

    /// Fetch and parse one feed URL.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<NewsItem>, MarketDataError> {
        debug!("Fetching news feed {}", url);

        let body = http::get_text(&self.client, SOURCE_NAME, url)
            .await
            .map_err(|e| MarketDataError::NewsUnavailable(e.to_string()))?;
        let feed = rss::parse_feed(&body).map_err(MarketDataError::NewsUnavailable)?;

        Ok(feed
            .items
            .into_iter()
            .take(self.limit)
            .map(|item| NewsItem {
                title: item.title,
                summary: truncate_chars(&item.summary, self.summary_chars),
                source: feed.title.clone(),
                time: item.published,
            })
            .collect())
    }
}

/// Keep the first `max` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
