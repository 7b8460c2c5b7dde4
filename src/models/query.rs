use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::DEFAULT_FORECAST_DAYS;

// ---------------------------------------------------------------------------
// Query - symbol and horizon as entered by the user
// ---------------------------------------------------------------------------

/// The form inputs for one submit cycle.
///
/// Nothing here is validated: an empty symbol or a negative horizon is sent
/// as-is and the service decides what to make of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub symbol: String,
    pub forecast_days: i64,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl Query {
    pub fn new(symbol: impl Into<String>, forecast_days: i64) -> Self {
        Self {
            symbol: symbol.into(),
            forecast_days,
        }
    }

    pub fn set_symbol(&mut self, symbol: impl Into<String>) {
        self.symbol = symbol.into();
    }

    /// Take the raw text of the horizon field.
    ///
    /// Text that is not an integer coerces to `0`; fractional input is
    /// truncated toward zero.
    pub fn set_forecast_days_input(&mut self, raw: &str) {
        let raw = raw.trim();
        self.forecast_days = match raw.parse::<i64>() {
            Ok(days) => days,
            Err(_) => raw
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(|d| d.trunc() as i64)
                .unwrap_or(0),
        };
    }

    /// Body for the `/stock-info` request.
    pub fn stock_info_body(&self) -> Value {
        json!({ "symbol": self.symbol })
    }

    /// Body for the `/predict` request.
    pub fn predict_body(&self) -> Value {
        json!({ "symbol": self.symbol, "forecast_days": self.forecast_days })
    }
}
