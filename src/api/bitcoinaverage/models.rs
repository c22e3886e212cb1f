use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nested averages by timeframe from the ticker endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Averages {
    pub day: f64,
    pub week: Option<f64>,
    pub month: Option<f64>,
}

/// Response from the current ticker endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub last: Option<f64>,
    pub averages: Averages,
}

/// One raw sample from the historical series endpoint
///
/// The API serves these newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub time: String,
    pub average: f64,
}

/// Errors raised by the price API client
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
