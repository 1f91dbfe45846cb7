//! Error handling for the application

use thiserror::Error;

/// Exchange-related errors
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Exchange not supported: {0}")]
    UnsupportedExchange(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Validation-related errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Malformed symbol: {0}")]
    MalformedSymbol(String),

    #[error("Asset status lookup failed on {exchange}: {source}")]
    StatusLookupFailed {
        exchange: String,
        source: ExchangeError,
    },
}

/// Store-related errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No pair data could be retrieved from any exchange")]
    NoMarketData,

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreError(err.to_string())
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::Unknown(err.to_string())
    }
}
