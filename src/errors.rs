use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration issues (the only class allowed to abort a run)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transaction service operations
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Notification delivery
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Data validation/serialisation
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Transaction service error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request could not be sent or the connection dropped
    #[error("Request failed: {endpoint} - {message}")]
    RequestFailed { endpoint: String, message: String },

    /// Service answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    /// Failed to deserialise response data
    #[error("Deserialisation failed: {0}")]
    DeserialisationFailed(String),

    /// Request exceeded the per-request timeout
    #[error("Request timeout: {timeout_seconds}s for {endpoint}")]
    Timeout {
        timeout_seconds: u64,
        endpoint: String,
    },

    /// Retry limit exceeded for a request
    #[error("Max retries exceeded: {endpoint} ({last_error})")]
    MaxRetriesExceeded { endpoint: String, last_error: String },
}

impl ServiceError {
    /// Whether a later attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::RequestFailed { .. } | ServiceError::Timeout { .. } => true,
            ServiceError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            ServiceError::DeserialisationFailed(_) | ServiceError::MaxRetriesExceeded { .. } => {
                false
            }
        }
    }
}

/// Per-channel notification error types
#[derive(Error, Debug)]
pub enum NotificationError {
    /// Generic delivery failure
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Webhook endpoint rejected the payload
    #[error("Webhook returned HTTP {status}")]
    Http { status: u16 },

    /// Telegram Bot API error
    #[error("Telegram error: {0}")]
    Telegram(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for transaction service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
