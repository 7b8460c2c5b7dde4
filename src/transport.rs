//! Outbound calls to the forecasting service.
//!
//! The service reports application errors inside a JSON body (an `error`
//! field), usually with a 200 status. [`Transport::post`] therefore parses
//! every body as JSON and never looks at the status code; callers inspect
//! the payload themselves.

use std::sync::{Mutex, PoisonError};

use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::{self, ServiceConfig};
use crate::error::Result;
use crate::models::ChartRef;

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    StockInfo,
    Predict,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::StockInfo => config::STOCK_INFO_PATH,
            Endpoint::Predict => config::PREDICT_PATH,
        }
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A JSON-in/JSON-out channel to the service.
///
/// Network and parse failures come back as `Err`; everything the service
/// managed to say in JSON, including `{"error": ...}`, comes back as `Ok`.
pub trait Transport {
    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value> {
        (**self).post(endpoint, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value> {
        (**self).post(endpoint, body)
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] over a blocking `reqwest` client.
///
/// The client is built on first use, so constructing a transport never
/// touches the network stack.
pub struct HttpTransport {
    config: ServiceConfig,
    client: Mutex<Option<Client>>,
}

impl HttpTransport {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<Client> {
        let mut slot = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// True once a request has caused the HTTP client to be built.
    pub fn is_open(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drop the HTTP client. The next request builds a fresh one.
    pub fn close(&self) {
        *self.client.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Download the image behind a chart reference.
    ///
    /// The freshness token travels in the query string, so the service and
    /// any cache in between see a distinct URL per prediction cycle.
    pub fn fetch_graph(&self, chart: &ChartRef) -> Result<Vec<u8>> {
        let url = self.config.graph_url(chart);
        tracing::debug!(%url, "fetching chart image");
        let resp = self.client()?.get(&url).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

impl Transport for HttpTransport {
    fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(%url, "posting request");

        let resp = self.client()?.post(&url).json(body).send()?;
        let status = resp.status();
        let text = resp.text()?;
        let value: Value = serde_json::from_str(&text)?;

        tracing::debug!(%url, status = status.as_u16(), "response parsed");
        Ok(value)
    }
}
