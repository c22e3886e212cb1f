//! coinchart - crypto price history store and chart assembly
//!
//! Fetches per-asset historical prices from the BitcoinAverage API, builds
//! a chart-ready multi-series dataset with deterministic color assignment
//! and a three-state fetch lifecycle, and renders it with plotters.

pub mod api;
pub mod models;
pub mod services;
pub mod store;

pub use api::{BitcoinAverageClient, PriceSource};
pub use models::{ChartData, ChartType, DataSeries, HistoricalPeriod};
pub use models::{PreferenceSource, StaticPreferences};
pub use store::{ChartError, ChartStore, FetchState, StoreEvent};
