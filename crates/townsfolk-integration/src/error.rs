use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    ServerError { status: u16, message: String },

    #[error("Dialogue service is offline or unreachable")]
    Offline,

    #[error("Request timed out")]
    Timeout,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Request was abandoned before completing")]
    Disconnected,
}

impl From<reqwest::Error> for IntegrationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IntegrationError::Timeout
        } else if err.is_connect() {
            IntegrationError::Offline
        } else {
            IntegrationError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IntegrationError {
    fn from(err: serde_json::Error) -> Self {
        IntegrationError::Serialization(err.to_string())
    }
}
