//! Historical period selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Historical aggregation granularity
///
/// Controls both the query parameter sent to the price API and the
/// time-label format applied to fetched records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoricalPeriod {
    Alltime,
    Daily,
    Monthly,
    /// Nothing selected yet; timestamps pass through unformatted
    Unset,
}

impl HistoricalPeriod {
    /// Query-string form sent to the price API
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Alltime => "alltime",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Unset => "",
        }
    }
}

impl Default for HistoricalPeriod {
    fn default() -> Self {
        Self::Alltime
    }
}

impl fmt::Display for HistoricalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            other => f.write_str(other.as_query()),
        }
    }
}

impl FromStr for HistoricalPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alltime" => Ok(Self::Alltime),
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "" => Ok(Self::Unset),
            _ => Err(format!(
                "Unknown period: '{}'. Supported: alltime, daily, monthly",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trip() {
        for name in ["alltime", "daily", "monthly"] {
            let parsed: HistoricalPeriod = name.parse().unwrap();
            assert_eq!(parsed.as_query(), name);
        }
    }

    #[test]
    fn test_empty_string_is_unset() {
        assert_eq!("".parse::<HistoricalPeriod>().unwrap(), HistoricalPeriod::Unset);
    }

    #[test]
    fn test_period_rejects_unknown() {
        let err = "weekly".parse::<HistoricalPeriod>().unwrap_err();
        assert!(err.contains("weekly"));
    }
}
