use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use coinchart::services::render_service;
use coinchart::{
    BitcoinAverageClient, ChartStore, ChartType, HistoricalPeriod, StaticPreferences, StoreEvent,
};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("coinchart=debug".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("📈 Starting coinchart...");
    info!("  coinchart v{} - crypto price history charts", env!("CARGO_PKG_VERSION"));
    info!("");

    let assets: Vec<String> = env_or("CHART_ASSETS", "BTC,ETH")
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    let currency = env_or("CHART_CURRENCY", "USD").to_uppercase();

    let results: usize = match env_or("CHART_RESULTS", "10").parse() {
        Ok(n) => n,
        Err(e) => {
            error!("Invalid CHART_RESULTS: {}", e);
            return;
        }
    };
    let period = match HistoricalPeriod::from_str(&env_or("CHART_PERIOD", "alltime")) {
        Ok(p) => p,
        Err(e) => {
            error!("Invalid CHART_PERIOD: {}", e);
            return;
        }
    };
    let chart_type = match ChartType::from_str(&env_or("CHART_TYPE", "line")) {
        Ok(t) => t,
        Err(e) => {
            error!("Invalid CHART_TYPE: {}", e);
            return;
        }
    };
    let output = env_or("CHART_OUTPUT", "chart.png");

    let client = match std::env::var("PRICE_API_BASE") {
        Ok(base) => BitcoinAverageClient::with_base_url(base),
        Err(_) => BitcoinAverageClient::new(),
    };
    let prefs = StaticPreferences::new(assets, currency, results);

    let mut store = ChartStore::new(Arc::new(client), Arc::new(prefs));
    // The logging observer stands in for the view layer
    store.subscribe(|event| match event {
        StoreEvent::FetchFailed(message) => warn!("Fetch failed: {}", message),
        other => info!("Store event: {:?}", other),
    });
    store.set_historical_period(period);
    store.set_chart_type(chart_type);

    if let Err(e) = store.historical_fetch().await {
        error!("Historical fetch failed: {}", e);
        return;
    }

    match render_service::generate_chart(store.chart_data(), store.chart_type(), 1280, 720) {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(&output, &bytes) {
                error!("Failed to write {}: {}", output, e);
                return;
            }
            info!("Chart written to {}", output);
        }
        Err(e) => {
            error!("Failed to render chart: {}", e);
        }
    }
}
