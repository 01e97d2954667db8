/// Error types for parsing dashboard inputs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Filter mode string not one of today/week/month/year/custom
    #[error("Unknown filter mode: {0}")]
    UnknownFilterMode(String),

    /// Interval string not one of day/week/month/year
    #[error("Unknown interval: {0}")]
    UnknownInterval(String),
}
