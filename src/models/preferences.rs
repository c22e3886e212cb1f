//! User preference inputs consumed by the chart store

/// Read-only view of the user's current chart preferences
pub trait PreferenceSource: Send + Sync {
    /// Ordered, duplicate-free asset symbols to chart
    fn selected_assets(&self) -> Vec<String>;

    /// Currency code prices are quoted in
    fn quote_currency(&self) -> String;

    /// Number of historical points requested per asset
    fn result_count(&self) -> usize;
}

/// Fixed preference values, built from the environment or a settings view
#[derive(Debug, Clone)]
pub struct StaticPreferences {
    assets: Vec<String>,
    currency: String,
    results: usize,
}

impl StaticPreferences {
    /// Keeps the first occurrence of each asset, dropping duplicates
    pub fn new(assets: Vec<String>, currency: String, results: usize) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(assets.len());
        for asset in assets {
            if !deduped.contains(&asset) {
                deduped.push(asset);
            }
        }
        Self {
            assets: deduped,
            currency,
            results,
        }
    }
}

impl PreferenceSource for StaticPreferences {
    fn selected_assets(&self) -> Vec<String> {
        self.assets.clone()
    }

    fn quote_currency(&self) -> String {
        self.currency.clone()
    }

    fn result_count(&self) -> usize {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_dropped_in_order() {
        let prefs = StaticPreferences::new(
            vec!["BTC".into(), "ETH".into(), "BTC".into()],
            "USD".into(),
            5,
        );
        assert_eq!(prefs.selected_assets(), vec!["BTC", "ETH"]);
        assert_eq!(prefs.quote_currency(), "USD");
        assert_eq!(prefs.result_count(), 5);
    }
}
