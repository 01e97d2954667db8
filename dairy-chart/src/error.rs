/// Error types for the aggregation core
use chrono::NaiveDate;
use dairy_feed::filter::Interval;
use thiserror::Error;

/// Contract violations caught before any fetch is issued.
///
/// Empty or sparse data is never an error; aggregation is total over
/// well-typed records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// Custom range whose start falls after its end
    #[error("Start date {start} must not be after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Custom mode selected without both dates
    #[error("Custom range requires both a start and an end date")]
    IncompleteCustomRange,

    /// Custom mode only buckets by day, week or month
    #[error("Interval {0} is not available for a custom range")]
    UnsupportedCustomInterval(Interval),
}

/// Type alias for Results using ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
