//! Live check of every upstream the market data core depends on.
//!
//! Prints one PASS/FAIL/WARN line per check and exits non-zero when any
//! check failed.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use investor_market_data::news::category_feed;
use investor_market_data::{
    MarketDataConfig, MarketDataService, MarketDataServiceTrait, NewsFetcher,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const QUOTE_CHECKS: &[(&str, &str)] = &[
    ("AAPL (US)", "AAPL"),
    ("Tencent (HK)", "0700.HK"),
    ("Moutai (CN)", "600519.SS"),
    ("Gold (Futures)", "GC=F"),
    ("Bitcoin (Crypto)", "BTCUSDT"),
    ("Typo: APPL", "APPL"),
    ("Futures: Copper", "铜"),
    ("Futures: Soybean", "大豆"),
    ("Futures: 10Y Bond", "10年美债"),
    ("Futures: Euro", "欧元期货"),
    ("Forex: USD/CNY", "人民币"),
    ("Forex: USD/JPY", "日元"),
    ("Index: DXY", "美元指数"),
];

const FEED_CHECKS: &[(&str, &str)] = &[
    ("US (MarketWatch)", "us"),
    ("CN (Google News)", "cn"),
    ("Macro (CNBC)", "macro"),
    ("Macro (WSJ)", "wsj_econ"),
    ("Crypto (Cointelegraph)", "crypto"),
];

const HISTORY_CHECKS: &[(&str, &str, &str, &str)] = &[
    ("AAPL (Last 1mo)", "AAPL", "1d", "1mo"),
    ("BTC (Last 5d)", "BTC-USD", "1h", "5d"),
];

const SENTIMENT_CHECKS: &[(&str, &str)] = &[("Crypto", "crypto"), ("US Stock", "us_stock")];

const SEARCH_INPUT: &str = "腾讯";
const SEARCH_EXPECTED: &str = "0700.HK";

fn init_tracing() {
    let log_format = std::env::var("INVESTOR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Running tally of check outcomes.
#[derive(Default)]
struct Report {
    passed: usize,
    warned: usize,
    failed: usize,
}

impl Report {
    fn pass(&mut self, name: &str, detail: String, took: Duration) {
        self.passed += 1;
        println!("✅ PASS: {:<25} - {} (took {:?})", name, detail, took);
    }

    fn warn(&mut self, name: &str, detail: String) {
        self.warned += 1;
        println!("⚠️ WARN: {:<25} - {}", name, detail);
    }

    fn fail(&mut self, name: &str, detail: String) {
        self.failed += 1;
        println!("❌ FAIL: {:<25} - {}", name, detail);
    }
}

async fn check_quotes(service: &MarketDataService, report: &mut Report) {
    println!("\n[Quotes] Checking provider chain...");
    for (name, symbol) in QUOTE_CHECKS {
        let start = Instant::now();
        let (result, diagnostics) = service.get_market_quote_with_diagnostics(symbol).await;
        match result {
            Ok(quote) => report.pass(
                name,
                format!(
                    "{} -> {} via {}: {:.2} ({:.2}%)",
                    symbol, quote.symbol, quote.source, quote.price, quote.change_pct
                ),
                start.elapsed(),
            ),
            Err(e) => {
                report.fail(name, format!("{} - [{}] {}", symbol, e.kind().code(), e));
                println!("        Attempts: {}", diagnostics.summary());
            }
        }
    }
}

async fn check_search(service: &MarketDataService, report: &mut Report) {
    println!("\n[Search] Testing '{}'...", SEARCH_INPUT);
    let start = Instant::now();
    let resolved = service.aggregator().resolve(SEARCH_INPUT).await;
    if resolved.as_str() == SEARCH_EXPECTED {
        report.pass(
            SEARCH_INPUT,
            format!("-> {} ({:?})", resolved, resolved.source()),
            start.elapsed(),
        );
    } else {
        report.fail(
            SEARCH_INPUT,
            format!("-> {} ({:?}), expected {}", resolved, resolved.source(), SEARCH_EXPECTED),
        );
    }
}

async fn check_feeds(news: &NewsFetcher, report: &mut Report) {
    println!("\n[RSS Feeds] Checking availability...");
    for (name, category) in FEED_CHECKS {
        let Some(url) = category_feed(category) else {
            report.fail(name, format!("no feed configured for '{}'", category));
            continue;
        };
        let start = Instant::now();
        match news.fetch_feed(url).await {
            Ok(items) if items.is_empty() => report.warn(name, "OK but 0 items".to_string()),
            Ok(items) => report.pass(name, format!("OK ({} items)", items.len()), start.elapsed()),
            Err(e) => report.fail(name, e.to_string()),
        }
    }
}

async fn check_history(service: &MarketDataService, report: &mut Report) {
    println!("\n[Historical Data] Checking availability...");
    for (name, symbol, interval, range) in HISTORY_CHECKS {
        let start = Instant::now();
        match service.get_historical_quotes(symbol, interval, range).await {
            Ok(bars) if bars.is_empty() => report.warn(name, format!("{} - 0 bars", symbol)),
            Ok(bars) => {
                let took = start.elapsed();
                let last = &bars[bars.len() - 1];
                report.pass(
                    name,
                    format!(
                        "{} - {} bars, last {} close {:.2}",
                        symbol,
                        bars.len(),
                        last.date,
                        last.close
                    ),
                    took,
                );
            }
            Err(e) => report.fail(name, format!("{} - {}", symbol, e)),
        }
    }
}

async fn check_sentiment(service: &MarketDataService, report: &mut Report) {
    println!("\n[Sentiment] Checking availability...");
    for (name, market) in SENTIMENT_CHECKS {
        let start = Instant::now();
        match service.get_market_sentiment(market).await {
            Ok(sentiment) => report.pass(
                name,
                format!("Score: {:.0} ({})", sentiment.score, sentiment.label),
                start.elapsed(),
            ),
            Err(e) => report.fail(name, e.to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = MarketDataConfig::from_env();
    let service = MarketDataService::from_config(&config)?;
    let news = NewsFetcher::new(&config)?;

    println!("🔍 Starting Data Source Health Check...");
    println!("----------------------------------------");

    let mut report = Report::default();
    check_quotes(&service, &mut report).await;
    check_search(&service, &mut report).await;
    check_feeds(&news, &mut report).await;
    check_history(&service, &mut report).await;
    check_sentiment(&service, &mut report).await;

    println!("----------------------------------------");
    println!(
        "Health check completed: {} passed, {} warned, {} failed.",
        report.passed, report.warned, report.failed
    );
    tracing::info!(
        passed = report.passed,
        warned = report.warned,
        failed = report.failed,
        "Health check finished"
    );

    Ok(if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
