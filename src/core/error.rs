//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A required configuration field is missing or empty
    #[error("Missing configuration field '{field}'. Please check documentation for the usage.")]
    MissingField { field: &'static str },

    /// HTTP request failed at the network level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The collection endpoint rejected the event
    #[error("Delivery rejected with status {status}: {message}")]
    Delivery { status: u16, message: String },
}

impl LoggerError {
    /// Create a missing-field configuration error
    pub fn missing_field(field: &'static str) -> Self {
        LoggerError::MissingField { field }
    }

    /// Create a delivery rejection error
    pub fn delivery(status: u16, message: impl Into<String>) -> Self {
        LoggerError::Delivery {
            status,
            message: message.into(),
        }
    }

    /// True for errors raised while validating configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, LoggerError::MissingField { .. })
    }
}
