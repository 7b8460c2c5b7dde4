//! Async wrapper tests. Run with `--features async`.

#![cfg(feature = "async")]

mod common;

use axum::routing::post;
use axum::Json;
use serde_json::json;
use stock_forecast::{AsyncStockForecast, ForecastError, Query};
use tokio::sync::Notify;

use std::sync::Arc;

async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_submit_runs_full_cycle() {
    let router = axum::Router::new()
        .route(
            "/stock-info",
            post(|| async { Json(common::stock_info_json("AAPL", "Apple Inc.")) }),
        )
        .route(
            "/predict",
            post(|| async { Json(common::predict_json(7, json!("192.34"))) }),
        );
    let base_url = serve(router).await;

    let app = AsyncStockForecast::builder()
        .base_url(&base_url)
        .build()
        .await
        .unwrap();
    let state = app.submit(Query::new("AAPL", 7)).await.unwrap();

    assert_eq!(state.current_price_text(), "192.34");
    assert_eq!(state.forecasts.lstm.len(), 7);
    assert_eq!(app.state(), state);
    app.close().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_submit_while_loading_is_busy() {
    let gate = Arc::new(Notify::new());
    let entered = Arc::new(Notify::new());

    let (g, e) = (gate.clone(), entered.clone());
    let router = axum::Router::new()
        .route(
            "/stock-info",
            post(move || {
                let (g, e) = (g.clone(), e.clone());
                async move {
                    e.notify_one();
                    g.notified().await;
                    Json(common::stock_info_json("AAPL", "Apple Inc."))
                }
            }),
        )
        .route(
            "/predict",
            post(|| async { Json(common::predict_json(3, json!(1.0))) }),
        );
    let base_url = serve(router).await;

    let app = Arc::new(
        AsyncStockForecast::builder()
            .base_url(&base_url)
            .build()
            .await
            .unwrap(),
    );

    let running = {
        let app = app.clone();
        tokio::spawn(async move { app.submit(Query::new("AAPL", 3)).await })
    };

    entered.notified().await;
    assert!(app.state().loading);
    let second = app.submit(Query::new("AAPL", 3)).await;
    assert!(matches!(second, Err(ForecastError::Busy)));

    gate.notify_one();
    let state = running.await.unwrap().unwrap();
    assert!(!state.loading);
    assert_eq!(state.forecasts.xgboost.len(), 3);

    if let Ok(app) = Arc::try_unwrap(app) {
        app.close().await.unwrap();
    }
}
