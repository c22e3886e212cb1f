//! The chart store: fetch orchestration and dataset lifecycle
//!
//! `ChartStore` owns the chart-ready dataset structure and drives the
//! end-to-end flow: validate preferences, fetch per-asset history, rebuild
//! the chart, and track the fetch lifecycle. Views read its state and
//! subscribe for change notification; they never mutate the chart directly.

mod dataset;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::api::bitcoinaverage::models::DataSourceError;
use crate::api::PriceSource;
use crate::models::chart::{ChartData, ChartType};
use crate::models::period::HistoricalPeriod;
use crate::models::preferences::PreferenceSource;

/// Errors raised while assembling chart data
#[derive(Debug, Error)]
pub enum ChartError {
    /// Precondition violation, no network call was made
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failure reported by the price API
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    /// Malformed record shape during slicing or labeling
    #[error("Transform failed: {0}")]
    Transform(String),
    /// A fetch is already running; the new one was rejected
    #[error("A fetch is already in progress")]
    FetchInProgress,
}

/// Lifecycle of the most recent fetch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Pending,
    Done,
    Error,
}

/// Change notifications delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    StateChanged(FetchState),
    DataChanged,
    ChartTypeChanged(ChartType),
    PeriodChanged(HistoricalPeriod),
    /// User-visible failure message for a failed fetch
    FetchFailed(String),
}

type Subscriber = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Store owning the chart dataset and the fetch state machine
pub struct ChartStore {
    source: Arc<dyn PriceSource>,
    prefs: Arc<dyn PreferenceSource>,
    chart: ChartData,
    chart_type: ChartType,
    period: HistoricalPeriod,
    state: FetchState,
    next_color: usize,
    in_flight: bool,
    subscribers: Vec<Subscriber>,
}

impl ChartStore {
    pub fn new(source: Arc<dyn PriceSource>, prefs: Arc<dyn PreferenceSource>) -> Self {
        Self {
            source,
            prefs,
            chart: ChartData::default(),
            chart_type: ChartType::default(),
            period: HistoricalPeriod::default(),
            state: FetchState::Pending,
            next_color: 0,
            in_flight: false,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback invoked on every store change
    pub fn subscribe(&mut self, subscriber: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn chart_data(&self) -> &ChartData {
        &self.chart
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn historical_period(&self) -> HistoricalPeriod {
        self.period
    }

    /// Select the chart rendering mode
    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
        debug!("Chart type is now {}", chart_type);
        self.notify(&StoreEvent::ChartTypeChanged(chart_type));
    }

    /// Select the historical aggregation granularity
    pub fn set_historical_period(&mut self, period: HistoricalPeriod) {
        self.period = period;
        self.notify(&StoreEvent::PeriodChanged(period));
    }

    /// Fetch the current snapshot for one asset and overwrite the first
    /// value of the first series with its day average
    pub async fn snapshot_fetch(&mut self, asset: &str, currency: &str) -> Result<(), ChartError> {
        if self.in_flight {
            return Err(ChartError::FetchInProgress);
        }
        self.in_flight = true;
        self.set_state(FetchState::Pending);

        let result = self.source.ticker(asset, currency).await;
        self.in_flight = false;

        match result {
            Ok(snapshot) => {
                if let Some(series) = self.chart.datasets.first_mut() {
                    if let Some(first) = series.values.first_mut() {
                        *first = snapshot.averages.day;
                    }
                }
                self.set_state(FetchState::Done);
                self.notify(&StoreEvent::DataChanged);
                Ok(())
            }
            Err(err) => {
                let err = ChartError::from(err);
                self.set_state(FetchState::Error);
                self.notify(&StoreEvent::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Fetch historical series for every selected asset and rebuild the
    /// chart dataset
    ///
    /// Assets are fetched sequentially in selection order, each series is
    /// cut to the requested result count and flipped oldest-first, then the
    /// previous chart data is cleared and the new series appended. Any
    /// failure moves the state to `Error` and surfaces the message to
    /// subscribers.
    pub async fn historical_fetch(&mut self) -> Result<(), ChartError> {
        if self.in_flight {
            return Err(ChartError::FetchInProgress);
        }
        self.in_flight = true;
        self.set_state(FetchState::Pending);

        let result = self.run_historical_fetch().await;
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.set_state(FetchState::Done);
                Ok(())
            }
            Err(err) => {
                self.set_state(FetchState::Error);
                self.notify(&StoreEvent::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn run_historical_fetch(&mut self) -> Result<(), ChartError> {
        let assets = self.prefs.selected_assets();
        let currency = self.prefs.quote_currency();
        let requested = self.prefs.result_count();

        if requested <= 1 {
            return Err(ChartError::InvalidParameter(
                "must request more than one result".to_string(),
            ));
        }

        // Sequential on purpose: color assignment and the shared label axis
        // depend on append order
        let mut fetched = Vec::with_capacity(assets.len());
        for asset in &assets {
            info!("Loading history for {}/{}", asset, currency);
            let records = self.source.history(asset, &currency, self.period).await?;
            fetched.push(records);
        }

        // The API serves newest-first; keep the first N and flip them
        for records in &mut fetched {
            records.truncate(requested);
            records.reverse();
        }

        self.chart.clear();
        self.next_color = 0;

        for (asset, records) in assets.iter().zip(&fetched) {
            dataset::append_series(
                &mut self.chart,
                &mut self.next_color,
                records,
                self.period,
                asset,
            )?;
        }

        self.notify(&StoreEvent::DataChanged);
        Ok(())
    }

    fn set_state(&mut self, state: FetchState) {
        self.state = state;
        self.notify(&StoreEvent::StateChanged(state));
    }

    fn notify(&self, event: &StoreEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}
