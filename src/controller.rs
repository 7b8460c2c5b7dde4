//! Submit-cycle orchestration.
//!
//! One cycle issues exactly two requests, strictly in order: `/stock-info`
//! and then `/predict`. A metadata failure does not stop the predict call,
//! and whatever the predict call yields decides the final error state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{ForecastError, Result};
use crate::models::Query;
use crate::normalize::{self, TokenClock};
use crate::state::ViewState;
use crate::transport::{Endpoint, Transport};

const STOCK_INFO_CONTEXT: &str = "Error fetching stock info";
const PREDICT_CONTEXT: &str = "Error fetching data";

/// The single message shown for any failure.
///
/// Service errors are shown verbatim. Transport errors are prefixed with
/// the step that failed.
fn display_message(err: &ForecastError, context: &str) -> String {
    if err.is_transport() {
        format!("{}: {}", context, err)
    } else {
        err.to_string()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the [`ViewState`] and drives submit cycles against a [`Transport`].
///
/// The state lock is taken only at commit points and is never held across
/// a request, so [`state()`](Self::state) can be read mid-cycle.
pub struct Controller<T> {
    transport: T,
    state: Mutex<ViewState>,
    clock: TokenClock,
}

impl<T: Transport> Controller<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(ViewState::new()),
            clock: TokenClock::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Run one full submit cycle and return the resulting state.
    ///
    /// Fails only with [`ForecastError::Busy`] when another cycle is still
    /// running; every other failure is folded into `ViewState::error`.
    pub fn submit(&self, query: &Query) -> Result<ViewState> {
        {
            let mut state = self.lock();
            if state.loading {
                tracing::debug!(symbol = %query.symbol, "submit rejected while loading");
                return Err(ForecastError::Busy);
            }
            state.begin_submit();
        }
        let cycle = Cycle { state: &self.state };

        tracing::debug!(symbol = %query.symbol, forecast_days = query.forecast_days, "submit cycle started");

        self.fetch_stock_info(query);
        self.lock().clear_error();
        self.fetch_prediction(query);

        drop(cycle);
        let state = self.state();
        tracing::debug!(
            symbol = %query.symbol,
            failed = state.has_error(),
            "submit cycle finished"
        );
        Ok(state)
    }

    fn fetch_stock_info(&self, query: &Query) {
        let outcome = self
            .transport
            .post(Endpoint::StockInfo, &query.stock_info_body())
            .and_then(|payload| normalize::decode_stock_info(&payload));

        match outcome {
            Ok(info) => {
                tracing::debug!(symbol = %info.symbol, name = %info.name, "stock info committed");
                self.lock().commit_stock_info(info);
            }
            Err(err) => {
                tracing::warn!(
                    symbol = %query.symbol,
                    error_kind = err.kind(),
                    error = %err,
                    "stock info request failed"
                );
                self.lock()
                    .fail_stock_info(display_message(&err, STOCK_INFO_CONTEXT));
            }
        }
    }

    fn fetch_prediction(&self, query: &Query) {
        let outcome = self
            .transport
            .post(Endpoint::Predict, &query.predict_body())
            .and_then(|payload| normalize::normalize(&payload, self.clock.next()));

        match outcome {
            Ok(prediction) => {
                tracing::debug!(
                    symbol = %query.symbol,
                    points = prediction.forecasts.lstm.len(),
                    "prediction committed"
                );
                self.lock().commit_prediction(prediction);
            }
            Err(err) => {
                tracing::warn!(
                    symbol = %query.symbol,
                    error_kind = err.kind(),
                    error = %err,
                    "prediction request failed"
                );
                self.lock()
                    .fail_prediction(display_message(&err, PREDICT_CONTEXT));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `loading` when a cycle ends, including by unwinding out of a
/// transport.
struct Cycle<'a> {
    state: &'a Mutex<ViewState>,
}

impl Drop for Cycle<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finish();
    }
}
