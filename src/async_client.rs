//! Async wrapper around [`StockForecast`] for use in async runtimes (Tokio, etc.).
//!
//! Requests run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Reading the state never waits on a request in flight.
//!
//! # Example
//!
//! ```no_run
//! use stock_forecast::{AsyncStockForecast, Query};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = AsyncStockForecast::builder().build().await.unwrap();
//!     let state = app.submit(Query::new("AAPL", 7)).await.unwrap();
//!     println!("{:?}", state.current_price);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::error::{ForecastError, Result};
use crate::models::{ChartRef, Query};
use crate::state::ViewState;
use crate::view::View;
use crate::StockForecast;

fn join_error(e: tokio::task::JoinError) -> ForecastError {
    ForecastError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncStockForecastBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStockForecast`] instance.
#[derive(Default)]
pub struct AsyncStockForecastBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl AsyncStockForecastBuilder {
    /// Set the service origin.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Bound every request to `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the async client.
    ///
    /// The blocking HTTP client is created on the blocking thread pool so it
    /// never touches the async event loop.
    pub async fn build(self) -> Result<AsyncStockForecast> {
        tokio::task::spawn_blocking(move || {
            let mut builder = StockForecast::builder();
            if let Some(url) = &self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let app = builder.build()?;
            Ok(AsyncStockForecast {
                inner: Arc::new(app),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncStockForecast
// ---------------------------------------------------------------------------

/// Async wrapper around [`StockForecast`].
///
/// A second [`submit()`](Self::submit) issued while one is running returns
/// [`ForecastError::Busy`] without sending anything.
pub struct AsyncStockForecast {
    inner: Arc<StockForecast>,
}

impl AsyncStockForecast {
    pub fn builder() -> AsyncStockForecastBuilder {
        AsyncStockForecastBuilder::default()
    }

    /// Run a sync operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StockForecast) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let app = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&app))
            .await
            .map_err(join_error)?
    }

    /// Run one submit cycle.
    pub async fn submit(&self, query: Query) -> Result<ViewState> {
        self.run(move |app| app.submit(&query)).await
    }

    /// Download a chart image.
    pub async fn fetch_graph(&self, chart: ChartRef) -> Result<Vec<u8>> {
        self.run(move |app| app.fetch_graph(&chart)).await
    }

    /// Snapshot of the current view state. Does not wait for a running cycle.
    pub fn state(&self) -> ViewState {
        self.inner.state()
    }

    pub fn view(&self, query: &Query) -> View {
        self.inner.view(query)
    }

    pub fn graph_url(&self, chart: &ChartRef) -> String {
        self.inner.graph_url(chart)
    }

    /// Release the client.
    ///
    /// The blocking HTTP client is dropped on the blocking thread pool.
    pub async fn close(self) -> Result<()> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || drop(inner))
            .await
            .map_err(join_error)
    }
}
