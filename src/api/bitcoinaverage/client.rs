use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{DataSourceError, HistoricalRecord, TickerSnapshot};
use crate::api::PriceSource;
use crate::models::period::HistoricalPeriod;

/// BitcoinAverage API client for current and historical index prices
pub struct BitcoinAverageClient {
    http_client: HttpClient,
    base_url: String,
}

impl BitcoinAverageClient {
    const DEFAULT_BASE_URL: &'static str = "https://apiv2.bitcoinaverage.com";

    /// Create a new client against the public API
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> DataSourceError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            404 => DataSourceError::NotFound(body_text),
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                DataSourceError::ServerError(status_code, body_text)
            }
            _ => {
                // Prefer the API's own message field when the body is JSON
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    DataSourceError::HttpError(status_code, message.to_string())
                } else {
                    DataSourceError::HttpError(status_code, body_text)
                }
            }
        }
    }
}

impl Default for BitcoinAverageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for BitcoinAverageClient {
    /// GET /indices/global/ticker/{ASSET}{CURRENCY}
    ///
    /// Retrieves the current snapshot for an asset/currency pair, including
    /// nested averages by timeframe.
    async fn ticker(
        &self,
        asset: &str,
        currency: &str,
    ) -> Result<TickerSnapshot, DataSourceError> {
        let url = format!(
            "{}/indices/global/ticker/{}{}",
            self.base_url, asset, currency
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataSourceError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<TickerSnapshot>()
            .await
            .map_err(|e| {
                DataSourceError::DeserializationError(format!("Failed to parse response: {}", e))
            })
    }

    /// GET /indices/global/history/{ASSET}{CURRENCY}?period={period}&format=json
    ///
    /// Retrieves the historical series for an asset/currency pair over the
    /// given period. Records come back newest-first.
    async fn history(
        &self,
        asset: &str,
        currency: &str,
        period: HistoricalPeriod,
    ) -> Result<Vec<HistoricalRecord>, DataSourceError> {
        let url = format!(
            "{}/indices/global/history/{}{}",
            self.base_url, asset, currency
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("period", period.as_query()), ("format", "json")])
            .send()
            .await
            .map_err(|e| DataSourceError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Vec<HistoricalRecord>>()
            .await
            .map_err(|e| {
                DataSourceError::DeserializationError(format!("Failed to parse response: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_ticker_parses_averages() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/indices/global/ticker/BTCUSD");
                then.status(200).json_body(json!({
                    "last": 9534.12,
                    "averages": {"day": 9400.5, "week": 9300.0, "month": 9100.0}
                }));
            })
            .await;

        let client = BitcoinAverageClient::with_base_url(server.base_url());
        let snapshot = client.ticker("BTC", "USD").await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.averages.day, 9400.5);
        assert_eq!(snapshot.last, Some(9534.12));
    }

    #[tokio::test]
    async fn test_history_preserves_served_order() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/indices/global/history/ETHUSD")
                    .query_param("period", "alltime")
                    .query_param("format", "json");
                then.status(200).json_body(json!([
                    {"time": "2020-01-03 00:00:00", "average": 9.0},
                    {"time": "2020-01-02 00:00:00", "average": 8.0},
                    {"time": "2020-01-01 00:00:00", "average": 7.0}
                ]));
            })
            .await;

        let client = BitcoinAverageClient::with_base_url(server.base_url());
        let records = client
            .history("ETH", "USD", HistoricalPeriod::Alltime)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].time, "2020-01-03 00:00:00");
        assert_eq!(records[0].average, 9.0);
        assert_eq!(records[2].average, 7.0);
    }

    #[tokio::test]
    async fn test_history_maps_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/indices/global/history/BTCUSD");
                then.status(500).body("index backend down");
            })
            .await;

        let client = BitcoinAverageClient::with_base_url(server.base_url());
        let err = client
            .history("BTC", "USD", HistoricalPeriod::Daily)
            .await
            .unwrap_err();

        assert!(matches!(err, DataSourceError::ServerError(500, _)));
    }

    #[tokio::test]
    async fn test_ticker_rejects_malformed_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/indices/global/ticker/BTCUSD");
                then.status(200).json_body(json!({"unexpected": true}));
            })
            .await;

        let client = BitcoinAverageClient::with_base_url(server.base_url());
        let err = client.ticker("BTC", "USD").await.unwrap_err();

        assert!(matches!(err, DataSourceError::DeserializationError(_)));
    }
}
