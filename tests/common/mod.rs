//! Shared test fixtures for the stock-forecast integration tests.
//!
//! Provides JSON payloads shaped like the forecasting service's responses,
//! a scripted in-memory [`Transport`] that records every call, and a
//! throwaway axum service for exercising the real HTTP transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use stock_forecast::{Endpoint, ForecastError, Result, Transport};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn stock_info_json(symbol: &str, name: &str) -> Value {
    json!({
        "symbol": symbol,
        "name": name,
        "sector": "Technology",
        "marketCap": 2950000000000u64,
        "peRatio": 29.4,
        "about": "Designs, manufactures and markets smartphones, personal computers, tablets, wearables and accessories."
    })
}

/// `days` consecutive points starting 2024-06-01, each carrying a time part.
pub fn forecast_series(days: usize, base: f64) -> Value {
    let points: Vec<Value> = (0..days)
        .map(|i| {
            json!({
                "date": format!("2024-06-{:02} 00:00:00", i + 1),
                "value": base + i as f64,
            })
        })
        .collect();
    Value::Array(points)
}

pub fn predict_json(days: usize, current_price: Value) -> Value {
    json!({
        "current_price": current_price,
        "lstm": {
            "forecast": forecast_series(days, 190.0),
            "graphs": {
                "actual_vs_predicted_lstm": "aapl_actual_vs_predicted_lstm.png",
                "forecasted_prices_lstm": "aapl_forecasted_prices_lstm.png",
                "training_vs_validation_loss_lstm": "aapl_training_vs_validation_loss_lstm.png",
                "residuals_histogram_lstm": "aapl_residuals_histogram_lstm.png"
            }
        },
        "xgboost": {
            "forecast": forecast_series(days, 191.0),
            "graphs": {
                "actual_vs_predicted_xgboost": "aapl_actual_vs_predicted_xgboost.png",
                "forecasted_prices_xgboost": "aapl_forecasted_prices_xgboost.png",
                "residuals_histogram_xgboost": "aapl_residuals_histogram_xgboost.png"
            }
        },
        "hybrid": {
            "forecast": forecast_series(days, 190.5),
            "graphs": {
                "actual_vs_predicted_weighted": "aapl_actual_vs_predicted_weighted.png",
                "forecasted_prices_weighted": "aapl_forecasted_prices_weighted.png",
                "residuals_histogram_weighted": "aapl_residuals_histogram_weighted.png",
                "comparison_predictions": "aapl_comparison_predictions.png"
            }
        }
    })
}

pub fn error_json(message: &str) -> Value {
    json!({ "error": message })
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// A canned reply for one call.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Simulates a body that is not JSON.
    Garbage,
}

/// In-memory transport replaying scripted replies per endpoint, in order.
#[derive(Default)]
pub struct ScriptedTransport {
    stock_info: Mutex<VecDeque<Reply>>,
    predict: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Endpoint, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_stock_info(self, reply: Reply) -> Self {
        self.stock_info.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_predict(self, reply: Reply) -> Self {
        self.predict.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value> {
        self.calls.lock().unwrap().push((endpoint, body.clone()));
        let queue = match endpoint {
            Endpoint::StockInfo => &self.stock_info,
            Endpoint::Predict => &self.predict,
        };
        let reply = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {:?}", endpoint));
        match reply {
            Reply::Json(value) => Ok(value),
            Reply::Garbage => Err(ForecastError::from(
                serde_json::from_str::<Value>("<html>Bad Gateway</html>").unwrap_err(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Mock HTTP service
// ---------------------------------------------------------------------------

/// A running axum service bound to an ephemeral local port.
///
/// The service lives on its own runtime, so blocking clients can be used
/// from the test thread.
pub struct MockService {
    pub base_url: String,
    pub received: Arc<Mutex<Vec<(String, Value)>>>,
    _runtime: tokio::runtime::Runtime,
}

/// Serve `router` until the returned [`MockService`] is dropped.
pub fn spawn_service(router: axum::Router) -> MockService {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    MockService {
        base_url: format!("http://{}", addr),
        received: Arc::new(Mutex::new(Vec::new())),
        _runtime: runtime,
    }
}

/// A service that answers `/stock-info` and `/predict` with fixed JSON and
/// records every request body it receives, keyed by path.
pub fn spawn_forecast_service(stock_info: Value, predict: Value) -> MockService {
    use axum::routing::post;
    use axum::Json;

    let received: Arc<Mutex<Vec<(String, Value)>>> = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    let info_route = post(move |Json(body): Json<Value>| {
        let log = log.clone();
        let reply = stock_info.clone();
        async move {
            log.lock().unwrap().push(("/stock-info".to_string(), body));
            Json(reply)
        }
    });

    let log = received.clone();
    let predict_route = post(move |Json(body): Json<Value>| {
        let log = log.clone();
        let reply = predict.clone();
        async move {
            log.lock().unwrap().push(("/predict".to_string(), body));
            Json(reply)
        }
    });

    let router = axum::Router::new()
        .route("/stock-info", info_route)
        .route("/predict", predict_route);

    let mut service = spawn_service(router);
    service.received = received;
    service
}

/// An origin on which nothing is listening.
pub fn unreachable_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
