use std::fmt::Write;

use chrono::Local;

use crate::models::{IndexQuote, NewsItem, Quote, SecurityAnalysis, Sentiment, Trend};
use crate::news::truncate_chars;

const SEPARATOR: &str = "-------------------";
const SPARK_BLOCKS: [char; 8] = [' ', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const FLAT_BLOCK: char = '▅';

const MAX_NEWS_ITEMS: usize = 5;
const NEWS_SUMMARY_CHARS: usize = 100;

/// Chart page for a quoted symbol.
///
/// Dashed USDT pairs come from OKX and link to its spot page, undashed ones
/// to TradingView's Binance chart, everything else to the Yahoo chart.
pub fn chart_link(symbol: &str) -> String {
    if symbol.to_uppercase().contains("USDT") {
        if symbol.contains('-') {
            return format!(
                "https://www.okx.com/zh-hans/trade-spot/{}",
                symbol.to_lowercase()
            );
        }
        return format!(
            "https://www.tradingview.com/chart/?symbol=BINANCE:{}",
            symbol
        );
    }
    format!("https://finance.yahoo.com/quote/{}/chart", symbol)
}

pub fn quote_card(quote: &Quote) -> String {
    let icon = if quote.change < 0.0 { "📉" } else { "📈" };
    let updated = quote
        .updated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");

    format!(
        "📊 **{} 实时行情**\n{}\n💰 价格: {:.2}\n{} 涨跌: {:.2} ({:.2}%)\n⏰ 更新: {}\n🔗 [查看K线图表]({})",
        quote.symbol,
        SEPARATOR,
        quote.price,
        icon,
        quote.change,
        quote.change_pct,
        updated,
        chart_link(&quote.symbol)
    )
}

/// Unicode block sparkline scaled between the series min and max.
pub fn sparkline(values: &[f64]) -> String {
    let Some(first) = values.first() else {
        return String::new();
    };
    let (min, max) = values
        .iter()
        .fold((*first, *first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let range = max - min;
    if range == 0.0 {
        return FLAT_BLOCK.to_string().repeat(values.len());
    }

    let top = (SPARK_BLOCKS.len() - 1) as f64;
    values
        .iter()
        .map(|v| SPARK_BLOCKS[((v - min) / range * top) as usize])
        .collect()
}

pub fn security_analysis_card(analysis: &SecurityAnalysis) -> String {
    let trend_icon = match analysis.trend {
        Trend::Bullish => "🐂",
        Trend::Bearish => "🐻",
        Trend::Sideways | Trend::Unknown => "➡️",
    };

    let closes: Vec<f64> = analysis.recent_bars.iter().map(|b| b.close).collect();
    let spark = sparkline(&closes);
    let spark = if spark.is_empty() {
        spark
    } else {
        format!("\n📈 走势: {}", spark)
    };

    format!(
        "🔍 **{symbol} 深度技术分析**
{sep}
当前价: {price:.2} | 趋势: {icon} {trend}{spark}
{sep}
• **均线系统**:
  MA20: {ma20:.2}
  MA60: {ma60:.2}
• **技术指标**:
  RSI(14): {rsi:.2}
  量比: {vol:.2}
• **关键点位**:
  压力位: {resistance:.2}
  支撑位: {support:.2}
{sep}
*注: 以上数据仅供参考，不构成投资建议*",
        symbol = analysis.symbol,
        sep = SEPARATOR,
        price = analysis.current_price,
        icon = trend_icon,
        trend = analysis.trend,
        spark = spark,
        ma20 = analysis.ma20,
        ma60 = analysis.ma60,
        rsi = analysis.rsi,
        vol = analysis.volume_ratio,
        resistance = analysis.resistance,
        support = analysis.support,
    )
}

pub fn news_digest(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return "暂无相关新闻资讯。".to_string();
    }

    let mut out = format!("📰 **最新市场资讯**\n{}\n", SEPARATOR);
    for item in news.iter().take(MAX_NEWS_ITEMS) {
        let _ = writeln!(out, "• **{}**", item.title);
        let _ = writeln!(out, "  *来源: {} | 时间: {}*", item.source, item.time);
        if !item.summary.is_empty() {
            let _ = writeln!(out, "  > {}", truncate_chars(&item.summary, NEWS_SUMMARY_CHARS));
        }
        out.push('\n');
    }
    out
}

pub fn index_board(indices: &[IndexQuote]) -> String {
    if indices.is_empty() {
        return "暂无指数数据。".to_string();
    }

    let mut out = format!("🌐 **全球市场概览**\n{}\n", SEPARATOR);
    for index in indices {
        let icon = if index.change < 0.0 { "📉" } else { "📈" };
        let _ = writeln!(
            out,
            "{} **{}**: {:.2} ({:+.2}, {:+.2}%)",
            icon, index.name, index.value, index.change, index.change_pct
        );
    }
    out
}

pub fn sentiment_card(sentiment: &Sentiment) -> String {
    let icon = match sentiment.score {
        s if s >= 55.0 => "🔥",
        s if s <= 45.0 => "🥶",
        _ => "😐",
    };
    format!(
        "🌡️ **市场情绪 ({})**\n{}\n{} 指数: {:.0} | {}\n📝 {}",
        sentiment.market, SEPARATOR, icon, sentiment.score, sentiment.label, sentiment.description
    )
}
