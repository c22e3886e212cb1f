pub mod bitcoinaverage;

use async_trait::async_trait;

use crate::api::bitcoinaverage::models::{DataSourceError, HistoricalRecord, TickerSnapshot};
use crate::models::period::HistoricalPeriod;

pub use bitcoinaverage::BitcoinAverageClient;

/// Asynchronous source of current and historical prices for one
/// asset/currency pair
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current snapshot with nested averages by timeframe
    async fn ticker(&self, asset: &str, currency: &str)
        -> Result<TickerSnapshot, DataSourceError>;

    /// Historical series for the given period, newest-first
    async fn history(
        &self,
        asset: &str,
        currency: &str,
        period: HistoricalPeriod,
    ) -> Result<Vec<HistoricalRecord>, DataSourceError>;
}
