//! In-memory view state and the commit points that mutate it.
//!
//! Each method on [`ViewState`] corresponds to one commit in the submit
//! cycle; the controller never assigns fields directly.

use serde::Serialize;

use crate::models::{ChartSets, CurrentPrice, Forecasts, Prediction, StockInfo};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub stock_info: Option<StockInfo>,
    pub current_price: Option<CurrentPrice>,
    pub forecasts: Forecasts,
    pub charts: ChartSets,
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the submitting state.
    ///
    /// Only `stock_info` and `error` are reset here. The previous forecast,
    /// price and charts stay until the predict call settles.
    pub fn begin_submit(&mut self) {
        self.loading = true;
        self.stock_info = None;
        self.error = None;
    }

    pub fn commit_stock_info(&mut self, info: StockInfo) {
        self.stock_info = Some(info);
        self.error = None;
    }

    pub fn fail_stock_info(&mut self, message: String) {
        self.stock_info = None;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace every prediction field with a fresh cycle's output.
    pub fn commit_prediction(&mut self, prediction: Prediction) {
        self.current_price = Some(prediction.current_price);
        self.forecasts = prediction.forecasts;
        self.charts = prediction.charts;
        self.error = None;
    }

    /// Record a predict failure and drop every prediction field.
    ///
    /// `stock_info` is left alone: a successful metadata call survives a
    /// failed predict call.
    pub fn fail_prediction(&mut self, message: String) {
        self.error = Some(message);
        self.current_price = None;
        self.forecasts = Forecasts::default();
        self.charts = ChartSets::default();
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error text, or `""` when there is none.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }

    /// The current price as display text, or `""` when there is none.
    pub fn current_price_text(&self) -> String {
        self.current_price
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default()
    }

    /// True when a full prediction is present and no error is showing.
    pub fn has_results(&self) -> bool {
        !self.has_error() && self.forecasts.is_complete()
    }
}
