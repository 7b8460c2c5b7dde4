//! Client for a remote stock forecasting service.
//!
//! A submit cycle asks the service for company metadata (`/stock-info`) and
//! then for a multi-model price forecast (`/predict`), and reconciles both
//! answers into a single [`ViewState`]. The forecast covers three models
//! (LSTM, XGBoost and a weighted hybrid), each with its own set of
//! diagnostic chart images served from `/graph/{ref}`.
//!
//! # Quick start
//!
//! ```no_run
//! use stock_forecast::{Query, StockForecast};
//!
//! let app = StockForecast::builder()
//!     .base_url("http://localhost:5000")
//!     .build()
//!     .unwrap();
//!
//! let query = Query::new("AAPL", 7);
//! let state = app.submit(&query).unwrap();
//! println!("{}", app.view(&query));
//! # let _ = state;
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod normalize;
pub mod state;
pub mod transport;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncStockForecast;
pub use config::ServiceConfig;
pub use controller::Controller;
pub use error::{ForecastError, Result};
pub use models::{
    ChartKind, ChartRef, ChartSets, CurrentPrice, Figure, ForecastPoint, Forecasts,
    FreshnessToken, HybridCharts, LstmCharts, ModelKind, Prediction, Query, StockInfo,
    XgboostCharts,
};
pub use normalize::normalize;
pub use state::ViewState;
pub use transport::{Endpoint, HttpTransport, Transport};
pub use view::View;

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// StockForecastBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StockForecast`] instance.
///
/// Use [`StockForecast::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StockForecastBuilder::build).
#[derive(Default)]
pub struct StockForecastBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl StockForecastBuilder {
    /// Set the service origin, e.g. `http://localhost:5000`.
    ///
    /// If not set, the `STOCK_FORECAST_URL` environment variable is used,
    /// falling back to `http://localhost:5000`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Bound every request to `timeout`.
    ///
    /// By default no timeout is enforced and a cycle waits as long as the
    /// service takes.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn config(&self) -> ServiceConfig {
        let mut config = match &self.base_url {
            Some(url) => ServiceConfig::new(url),
            None => ServiceConfig::default(),
        };
        config.timeout = self.timeout;
        config
    }

    /// Build the client. The HTTP client itself is created on the first
    /// request.
    pub fn build(self) -> Result<StockForecast> {
        let config = self.config();
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ForecastError::InvalidArgument(format!(
                "service origin must be an http(s) URL, got '{}'",
                config.base_url
            )));
        }
        let transport = HttpTransport::new(config);
        Ok(StockForecast {
            controller: Controller::new(transport),
        })
    }
}

// ---------------------------------------------------------------------------
// StockForecast
// ---------------------------------------------------------------------------

/// The main entry point: a [`Controller`] over the HTTP transport.
pub struct StockForecast {
    controller: Controller<HttpTransport>,
}

impl StockForecast {
    pub fn builder() -> StockForecastBuilder {
        StockForecastBuilder::default()
    }

    /// Run one submit cycle (metadata, then prediction) and return the
    /// resulting state.
    ///
    /// Returns [`ForecastError::Busy`] if a cycle is already running.
    pub fn submit(&self, query: &Query) -> Result<ViewState> {
        self.controller.submit(query)
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.controller.state()
    }

    /// Project the current state for display.
    pub fn view(&self, query: &Query) -> View {
        view::project(&self.controller.state(), query, self.config())
    }

    pub fn config(&self) -> &ServiceConfig {
        self.controller.transport().config()
    }

    /// Absolute URL of a chart image, freshness token included.
    pub fn graph_url(&self, chart: &ChartRef) -> String {
        self.config().graph_url(chart)
    }

    /// Download a chart image.
    pub fn fetch_graph(&self, chart: &ChartRef) -> Result<Vec<u8>> {
        self.controller.transport().fetch_graph(chart)
    }

    pub fn controller(&self) -> &Controller<HttpTransport> {
        &self.controller
    }
}

impl fmt::Display for StockForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        write!(
            f,
            "StockForecast(base_url={}, loading={}, symbol={})",
            self.config().base_url,
            state.loading,
            state
                .stock_info
                .as_ref()
                .map(|s| s.symbol.as_str())
                .unwrap_or("-")
        )
    }
}
