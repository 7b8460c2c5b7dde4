#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a JSON body carrying an `error` field.
    #[error("{0}")]
    Service(String),

    /// The payload was well-formed JSON but did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("A submission is already in progress")]
    Busy,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ForecastError {
    /// Connectivity or body-parse failure below the application layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ForecastError::Http(_) | ForecastError::Json(_))
    }

    /// Application-level failure reported by (or decoded from) the service.
    pub fn is_service(&self) -> bool {
        matches!(self, ForecastError::Service(_) | ForecastError::Decode(_))
    }

    /// Short label used as the `error_kind` field in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::Http(_) | ForecastError::Json(_) => "transport",
            ForecastError::Service(_) => "service",
            ForecastError::Decode(_) => "decode",
            ForecastError::Busy => "busy",
            ForecastError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
