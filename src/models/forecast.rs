use serde::{Deserialize, Serialize};
use std::fmt;

use super::chart::{HybridCharts, LstmCharts, XgboostCharts};

// ---------------------------------------------------------------------------
// CurrentPrice - shown exactly as the service returned it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentPrice {
    Number(f64),
    Text(String),
}

impl CurrentPrice {
    /// True for values that carry no price: empty text, zero or NaN.
    pub fn is_blank(&self) -> bool {
        match self {
            CurrentPrice::Number(n) => *n == 0.0 || n.is_nan(),
            CurrentPrice::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for CurrentPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentPrice::Number(n) => write!(f, "{}", n),
            CurrentPrice::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// ForecastPoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Timestamp text such as `"2024-06-03 00:00:00"`.
    pub date: String,
    pub value: f64,
}

impl ForecastPoint {
    /// The portion of `date` before the first space.
    pub fn date_only(&self) -> &str {
        self.date.split(' ').next().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Forecasts - one series per model, aligned by day offset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecasts {
    pub lstm: Vec<ForecastPoint>,
    pub xgboost: Vec<ForecastPoint>,
    pub hybrid: Vec<ForecastPoint>,
}

impl Forecasts {
    pub fn is_empty(&self) -> bool {
        self.lstm.is_empty() && self.xgboost.is_empty() && self.hybrid.is_empty()
    }

    /// True when every model produced at least one point.
    pub fn is_complete(&self) -> bool {
        !self.lstm.is_empty() && !self.xgboost.is_empty() && !self.hybrid.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ChartSets - per-model diagnostic charts for one prediction cycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSets {
    pub lstm: Option<LstmCharts>,
    pub xgboost: Option<XgboostCharts>,
    pub hybrid: Option<HybridCharts>,
}

impl ChartSets {
    pub fn is_empty(&self) -> bool {
        self.lstm.is_none() && self.xgboost.is_none() && self.hybrid.is_none()
    }
}

// ---------------------------------------------------------------------------
// Prediction - normalized `/predict` payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub current_price: CurrentPrice,
    pub forecasts: Forecasts,
    pub charts: ChartSets,
}
