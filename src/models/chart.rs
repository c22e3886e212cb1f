//! Chart dataset models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fill colors handed out to series in append order
pub const PALETTE: [&str; 7] = [
    "rgba(126, 65, 73, 0.4)",
    "rgba(138, 92, 123, 0.4)",
    "rgba(118, 129, 167, 0.4)",
    "rgba(73, 167, 185, 0.4)",
    "rgba(69, 200, 170, 0.4)",
    "rgba(144, 225, 134, 0.4)",
    "rgba(239, 238, 105, 0.4)",
];

/// Supported chart rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
        }
    }
}

impl Default for ChartType {
    fn default() -> Self {
        Self::Line
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            "doughnut" => Ok(Self::Doughnut),
            _ => Err(format!(
                "Unknown chart type: '{}'. Supported: line, bar, pie, doughnut",
                s
            )),
        }
    }
}

/// One asset's time-series over the shared label axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    /// Legend name, the asset symbol
    pub legend: String,
    /// Values in chronological order, oldest first
    pub values: Vec<f64>,
    /// rgba() fill color, assigned at creation and never reassigned
    pub color: String,
}

/// The dataset structure consumed by the chart renderer
///
/// Every series shares the single `labels` axis, so all series must carry
/// the same number of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub datasets: Vec<DataSeries>,
    pub labels: Vec<String>,
}

impl ChartData {
    /// Empty both the series list and the label axis
    pub fn clear(&mut self) {
        self.datasets.clear();
        self.labels.clear();
    }
}

impl Default for ChartData {
    /// Placeholder chart shown before the first fetch completes
    fn default() -> Self {
        Self {
            datasets: vec![DataSeries {
                legend: "Default chart".to_string(),
                values: vec![3.0, 2.0, 1.0, 4.0, 2.0, 5.0, 1.0, 8.0, 7.0, 10.0],
                color: PALETTE[0].to_string(),
            }],
            labels: (1..=10).map(|n| n.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_round_trip() {
        for name in ["line", "bar", "pie", "doughnut"] {
            let parsed: ChartType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_chart_type_rejects_unknown() {
        let err = "radar".parse::<ChartType>().unwrap_err();
        assert!(err.contains("radar"));
    }

    #[test]
    fn test_default_chart_has_matching_axis() {
        let chart = ChartData::default();
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].values.len(), chart.labels.len());
    }

    #[test]
    fn test_clear_empties_series_and_labels() {
        let mut chart = ChartData::default();
        chart.clear();
        assert!(chart.datasets.is_empty());
        assert!(chart.labels.is_empty());
    }
}
