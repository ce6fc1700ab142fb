//! Shared HTTP plumbing for the venue adapters.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::MarketDataError;

/// Build a client with the browser user agent and a per-call timeout.
pub fn build_client(
    provider: &str,
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, MarketDataError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| {
            MarketDataError::provider(provider, format!("Failed to build HTTP client: {}", e))
        })
}

/// Send a GET and map transport failures and non-2xx statuses.
pub async fn get(client: &Client, provider: &str, url: &str) -> Result<Response, MarketDataError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| transport_error(provider, e))?;
    check_status(provider, response)
}

/// GET and decode a JSON body.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &str,
    url: &str,
) -> Result<T, MarketDataError> {
    let response = get(client, provider, url).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| MarketDataError::parse(provider, e.to_string()))
}

/// GET and read the body as text.
pub async fn get_text(client: &Client, provider: &str, url: &str) -> Result<String, MarketDataError> {
    let response = get(client, provider, url).await?;
    response.text().await.map_err(|e| transport_error(provider, e))
}

pub fn check_status(provider: &str, response: Response) -> Result<Response, MarketDataError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }
    if !status.is_success() {
        return Err(MarketDataError::provider(
            provider,
            format!("HTTP {}", status.as_u16()),
        ));
    }
    Ok(response)
}

pub fn transport_error(provider: &str, error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: provider.to_string(),
        }
    } else {
        MarketDataError::Network(error)
    }
}

/// Parse a venue's string-encoded number.
pub fn parse_decimal_str(provider: &str, field: &str, value: &str) -> Result<f64, MarketDataError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketDataError::parse(provider, format!("Invalid {} '{}'", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_str() {
        assert_eq!(parse_decimal_str("BINANCE", "lastPrice", "64123.50").unwrap(), 64123.5);
        assert_eq!(parse_decimal_str("BINANCE", "lastPrice", " -1.25 ").unwrap(), -1.25);
        assert!(parse_decimal_str("BINANCE", "lastPrice", "").is_err());
        assert!(parse_decimal_str("BINANCE", "lastPrice", "NaN").is_err());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        let limited = server
            .mock("GET", "/limited")
            .with_status(429)
            .create_async()
            .await;
        let missing = server
            .mock("GET", "/missing")
            .with_status(503)
            .create_async()
            .await;

        let client = build_client("TEST", "agent", Duration::from_secs(2)).unwrap();

        let err = get(&client, "TEST", &format!("{}/limited", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));

        let err = get(&client, "TEST", &format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        match err {
            MarketDataError::ProviderError { provider, message } => {
                assert_eq!(provider, "TEST");
                assert_eq!(message, "HTTP 503");
            }
            other => panic!("Expected ProviderError, got {:?}", other),
        }

        limited.assert_async().await;
        missing.assert_async().await;
    }
}
