pub mod client;
pub mod models;

pub use client::BitcoinAverageClient;
pub use models::{Averages, DataSourceError, HistoricalRecord, TickerSnapshot};
