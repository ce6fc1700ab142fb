//! Markdown renderings of the structured records.

mod markdown;

pub use markdown::{
    chart_link, index_board, news_digest, quote_card, security_analysis_card, sentiment_card,
    sparkline,
};
