/// Error types for usage providers
use thiserror::Error;

/// Failure to obtain records from a provider.
///
/// The dashboard never propagates this: it renders an empty chart and
/// shows the message.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture file was not valid CSV
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Fixture file could not be read
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Provider answered with `success: false` or an error status
    #[error("{0}")]
    Rejected(String),
}

/// Type alias for Results using ProviderError
pub type Result<T> = std::result::Result<T, ProviderError>;
