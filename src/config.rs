use std::time::Duration;

use crate::models::ChartRef;
use crate::transport::Endpoint;

pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";
pub const ORIGIN_ENV: &str = "STOCK_FORECAST_URL";

pub const STOCK_INFO_PATH: &str = "/stock-info";
pub const PREDICT_PATH: &str = "/predict";
pub const GRAPH_PATH: &str = "/graph";

/// Query key carrying the freshness token on chart URLs.
pub const FRESHNESS_KEY: &str = "t";

pub const DEFAULT_FORECAST_DAYS: i64 = 7;

/// Characters of the company blurb shown while collapsed.
pub const ABOUT_PREVIEW_CHARS: usize = 300;

pub fn default_origin() -> String {
    match std::env::var(ORIGIN_ENV) {
        Ok(url) if !url.trim().is_empty() => normalize_origin(&url),
        _ => DEFAULT_ORIGIN.to_string(),
    }
}

fn normalize_origin(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Where the forecasting service lives and how long to wait on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// `None` leaves request duration unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_origin(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_origin(base_url),
            timeout: None,
        }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Absolute image URL for a chart, freshness token included.
    pub fn graph_url(&self, chart: &ChartRef) -> String {
        format!("{}{}/{}", self.base_url, GRAPH_PATH, chart)
    }
}
