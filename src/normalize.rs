//! Decoding of service payloads into display-ready models.
//!
//! Decoding is two-phase: an `error` field anywhere at the top level wins
//! and becomes [`ForecastError::Service`]; otherwise the payload must match
//! the expected shape exactly, and any missing or mistyped nested field
//! becomes [`ForecastError::Decode`].

use std::sync::atomic::{AtomicI64, Ordering};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ForecastError, Result};
use crate::models::{
    ChartRef, ChartSets, CurrentPrice, ForecastPoint, Forecasts, FreshnessToken, HybridCharts,
    LstmCharts, Prediction, StockInfo, XgboostCharts,
};

// ---------------------------------------------------------------------------
// Wire shapes of `/predict`
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PredictPayload {
    current_price: CurrentPrice,
    lstm: ModelSection<LstmGraphs>,
    xgboost: ModelSection<XgboostGraphs>,
    hybrid: ModelSection<HybridGraphs>,
}

#[derive(Deserialize)]
struct ModelSection<G> {
    forecast: Vec<ForecastPoint>,
    graphs: G,
}

#[derive(Deserialize)]
struct LstmGraphs {
    actual_vs_predicted_lstm: String,
    forecasted_prices_lstm: String,
    training_vs_validation_loss_lstm: String,
    residuals_histogram_lstm: String,
}

#[derive(Deserialize)]
struct XgboostGraphs {
    actual_vs_predicted_xgboost: String,
    forecasted_prices_xgboost: String,
    residuals_histogram_xgboost: String,
}

#[derive(Deserialize)]
struct HybridGraphs {
    actual_vs_predicted_weighted: String,
    forecasted_prices_weighted: String,
    residuals_histogram_weighted: String,
    comparison_predictions: String,
}

impl LstmGraphs {
    fn stamp(self, token: FreshnessToken) -> LstmCharts {
        LstmCharts {
            actual_vs_predicted: ChartRef::new(self.actual_vs_predicted_lstm, token),
            forecasted_prices: ChartRef::new(self.forecasted_prices_lstm, token),
            training_vs_validation_loss: ChartRef::new(self.training_vs_validation_loss_lstm, token),
            residuals_histogram: ChartRef::new(self.residuals_histogram_lstm, token),
        }
    }
}

impl XgboostGraphs {
    fn stamp(self, token: FreshnessToken) -> XgboostCharts {
        XgboostCharts {
            actual_vs_predicted: ChartRef::new(self.actual_vs_predicted_xgboost, token),
            forecasted_prices: ChartRef::new(self.forecasted_prices_xgboost, token),
            residuals_histogram: ChartRef::new(self.residuals_histogram_xgboost, token),
        }
    }
}

impl HybridGraphs {
    fn stamp(self, token: FreshnessToken) -> HybridCharts {
        HybridCharts {
            actual_vs_predicted: ChartRef::new(self.actual_vs_predicted_weighted, token),
            forecasted_prices: ChartRef::new(self.forecasted_prices_weighted, token),
            residuals_histogram: ChartRef::new(self.residuals_histogram_weighted, token),
            comparison_predictions: ChartRef::new(self.comparison_predictions, token),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// The message of a truthy top-level `error` field, if any.
///
/// Empty strings, `false`, `0` and `null` do not count as errors.
pub fn service_error(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Decode a `/stock-info` payload.
pub fn decode_stock_info(payload: &Value) -> Result<StockInfo> {
    if let Some(msg) = service_error(payload) {
        return Err(ForecastError::Service(msg));
    }
    StockInfo::deserialize(payload).map_err(|e| ForecastError::Decode(format!("stock info: {e}")))
}

/// Convert a `/predict` payload into a [`Prediction`].
///
/// Every chart locator in the result carries `token`. Forecast series keep
/// the order in which the service listed them.
pub fn normalize(payload: &Value, token: FreshnessToken) -> Result<Prediction> {
    if let Some(msg) = service_error(payload) {
        return Err(ForecastError::Service(msg));
    }
    let raw = PredictPayload::deserialize(payload)
        .map_err(|e| ForecastError::Decode(format!("prediction: {e}")))?;

    Ok(Prediction {
        current_price: raw.current_price,
        forecasts: Forecasts {
            lstm: raw.lstm.forecast,
            xgboost: raw.xgboost.forecast,
            hybrid: raw.hybrid.forecast,
        },
        charts: ChartSets {
            lstm: Some(raw.lstm.graphs.stamp(token)),
            xgboost: Some(raw.xgboost.graphs.stamp(token)),
            hybrid: Some(raw.hybrid.graphs.stamp(token)),
        },
    })
}

// ---------------------------------------------------------------------------
// TokenClock
// ---------------------------------------------------------------------------

/// Hands out strictly increasing freshness tokens.
///
/// Tokens follow the wall clock in milliseconds, but two calls landing in
/// the same millisecond (or a clock that steps backwards) still get
/// distinct values.
#[derive(Debug, Default)]
pub struct TokenClock {
    last: AtomicI64,
}

impl TokenClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> FreshnessToken {
        let now = FreshnessToken::now().millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        FreshnessToken(now.max(prev.saturating_add(1)))
    }
}
