//! End-to-end checks of the service against mocked upstream venues.

use investor_market_data::{
    MarketDataConfig, MarketDataService, MarketDataServiceTrait, BROWSER_USER_AGENT,
};
use mockito::{Matcher, Server};

fn service_for(server: &Server) -> MarketDataService {
    let config = MarketDataConfig::default().with_base_url(&server.url());
    MarketDataService::from_config(&config).unwrap()
}

const OKX_BTC: &str = r#"{"code":"0","msg":"","data":[{"instId":"BTC-USDT","last":"66000","open24h":"60000","ts":"1718000000000"}]}"#;

#[tokio::test]
async fn test_chinese_crypto_name_quotes_from_crypto_venue_first() {
    let mut server = Server::new_async().await;
    let okx = server
        .mock("GET", "/api/v5/market/ticker")
        .match_query(Matcher::UrlEncoded("instId".into(), "BTC-USDT".into()))
        .match_header("user-agent", BROWSER_USER_AGENT)
        .with_status(200)
        .with_body(OKX_BTC)
        .create_async()
        .await;
    let chart = server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/".to_string()))
        .expect(0)
        .create_async()
        .await;

    let svc = service_for(&server);
    let (result, diagnostics) = svc.get_market_quote_with_diagnostics("比特币").await;

    let quote = result.unwrap();
    assert_eq!(quote.symbol, "BTC-USDT");
    assert_eq!(quote.price, 66000.0);
    assert_eq!(quote.change, 6000.0);
    assert!((quote.change_pct - 10.0).abs() < 1e-9);
    assert_eq!(diagnostics.winner(), Some("OKX"));

    okx.assert_async().await;
    chart.assert_async().await;
}

#[tokio::test]
async fn test_crypto_falls_back_to_second_exchange() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v5/market/ticker")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let binance = server
        .mock("GET", "/api/v3/ticker/24hr")
        .match_query(Matcher::UrlEncoded("symbol".into(), "ETHUSDT".into()))
        .with_status(200)
        .with_body(r#"{"symbol":"ETHUSDT","lastPrice":"3300.00","priceChange":"300.00","priceChangePercent":"10.000"}"#)
        .create_async()
        .await;

    let svc = service_for(&server);
    let quote = svc.get_market_quote("ethusdt").await.unwrap();

    assert_eq!(quote.source, "BINANCE");
    assert_eq!(quote.price, 3300.0);
    assert_eq!(quote.change, 300.0);
    binance.assert_async().await;
}

#[tokio::test]
async fn test_history_drops_gap_bars_and_sorts() {
    let mut server = Server::new_async().await;
    let body = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "regularMarketPrice": 190.0, "previousClose": 188.0},
                "timestamp": [1704326400, 1704153600, 1704240000, 1704412800],
                "indicators": {"quote": [{
                    "close": [185.5, 185.6, null, 181.2],
                    "volume": [30000, 82000, null, 62000]
                }]}
            }],
            "error": null
        }
    }"#;
    server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("interval".into(), "1d".into()),
            Matcher::UrlEncoded("range".into(), "1mo".into()),
        ]))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let svc = service_for(&server);
    let bars = svc.get_historical_quotes("AAPL", "1d", "1mo").await.unwrap();

    let dates: Vec<&str> = bars.iter().map(|b| b.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-04", "2024-01-05"]);
    assert!(bars.iter().all(|b| !(b.close == 0.0 && b.volume == 0.0)));
    assert_eq!(bars[0].close, 185.6);
}
