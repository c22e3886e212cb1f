//! Data models for the chart store and renderer
//!
//! This module organizes the dataset structures handed to the renderer and
//! the value types the store operates on.

pub mod chart;
pub mod period;
pub mod preferences;

// Re-export commonly used types for convenience
pub use chart::{ChartData, ChartType, DataSeries, PALETTE};
pub use period::HistoricalPeriod;
pub use preferences::{PreferenceSource, StaticPreferences};
