use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FRESHNESS_KEY;

// ---------------------------------------------------------------------------
// FreshnessToken - cache-busting value shared by one normalization
// ---------------------------------------------------------------------------

/// Epoch milliseconds appended to chart locators as `?t=<token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FreshnessToken(pub i64);

impl FreshnessToken {
    pub fn now() -> Self {
        FreshnessToken(chrono::Utc::now().timestamp_millis())
    }

    pub fn millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FreshnessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ChartRef
// ---------------------------------------------------------------------------

/// An opaque chart locator from the service plus the token of the cycle
/// that produced it. Displays as `locator?t=token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRef {
    pub locator: String,
    pub token: FreshnessToken,
}

impl ChartRef {
    pub fn new(locator: impl Into<String>, token: FreshnessToken) -> Self {
        Self {
            locator: locator.into(),
            token,
        }
    }
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}={}", self.locator, FRESHNESS_KEY, self.token)
    }
}

// ---------------------------------------------------------------------------
// ModelKind / ChartKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Lstm,
    Xgboost,
    Hybrid,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Lstm, ModelKind::Xgboost, ModelKind::Hybrid];

    /// Key of this model's section in the `/predict` payload.
    pub fn key(self) -> &'static str {
        match self {
            ModelKind::Lstm => "lstm",
            ModelKind::Xgboost => "xgboost",
            ModelKind::Hybrid => "hybrid",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModelKind::Lstm => "LSTM Neural Network Analysis",
            ModelKind::Xgboost => "XGBoost Ensemble Analysis",
            ModelKind::Hybrid => "Hybrid Model Analysis",
        }
    }

    /// Column heading in the forecast table.
    pub fn column(self) -> &'static str {
        match self {
            ModelKind::Lstm => "LSTM Network",
            ModelKind::Xgboost => "XGBoost Model",
            ModelKind::Hybrid => "Weighted Average",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    ActualVsPredicted,
    ForecastedPrices,
    TrainingVsValidationLoss,
    ResidualsHistogram,
    ComparisonPredictions,
}

impl ChartKind {
    pub fn key(self) -> &'static str {
        match self {
            ChartKind::ActualVsPredicted => "actual_vs_predicted",
            ChartKind::ForecastedPrices => "forecasted_prices",
            ChartKind::TrainingVsValidationLoss => "training_vs_validation_loss",
            ChartKind::ResidualsHistogram => "residuals_histogram",
            ChartKind::ComparisonPredictions => "comparison_predictions",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            ChartKind::ActualVsPredicted => "Actual vs Predicted Values",
            ChartKind::ForecastedPrices => "Forecasted Price Trajectory",
            ChartKind::TrainingVsValidationLoss => "Training Validation Metrics",
            ChartKind::ResidualsHistogram => "Error Distribution Analysis",
            ChartKind::ComparisonPredictions => "Model Performance Comparison",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-model chart sets
//
// The key sets differ by model: only the recurrent model reports training
// loss, only the hybrid reports the cross-model comparison.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LstmCharts {
    pub actual_vs_predicted: ChartRef,
    pub forecasted_prices: ChartRef,
    pub training_vs_validation_loss: ChartRef,
    pub residuals_histogram: ChartRef,
}

impl LstmCharts {
    pub fn entries(&self) -> Vec<(ChartKind, &ChartRef)> {
        vec![
            (ChartKind::ActualVsPredicted, &self.actual_vs_predicted),
            (ChartKind::ForecastedPrices, &self.forecasted_prices),
            (ChartKind::TrainingVsValidationLoss, &self.training_vs_validation_loss),
            (ChartKind::ResidualsHistogram, &self.residuals_histogram),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XgboostCharts {
    pub actual_vs_predicted: ChartRef,
    pub forecasted_prices: ChartRef,
    pub residuals_histogram: ChartRef,
}

impl XgboostCharts {
    pub fn entries(&self) -> Vec<(ChartKind, &ChartRef)> {
        vec![
            (ChartKind::ActualVsPredicted, &self.actual_vs_predicted),
            (ChartKind::ForecastedPrices, &self.forecasted_prices),
            (ChartKind::ResidualsHistogram, &self.residuals_histogram),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridCharts {
    pub actual_vs_predicted: ChartRef,
    pub forecasted_prices: ChartRef,
    pub residuals_histogram: ChartRef,
    pub comparison_predictions: ChartRef,
}

impl HybridCharts {
    pub fn entries(&self) -> Vec<(ChartKind, &ChartRef)> {
        vec![
            (ChartKind::ActualVsPredicted, &self.actual_vs_predicted),
            (ChartKind::ForecastedPrices, &self.forecasted_prices),
            (ChartKind::ResidualsHistogram, &self.residuals_histogram),
            (ChartKind::ComparisonPredictions, &self.comparison_predictions),
        ]
    }
}
