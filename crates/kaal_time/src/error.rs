//! Error types for time conversions.

/// Errors from date-time parsing and Julian Date conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// UTC offset text could not be parsed.
    #[error("invalid UTC offset: {0}")]
    InvalidOffset(String),
    /// Date-time text could not be parsed.
    #[error("invalid date-time: {0}")]
    InvalidDateTime(String),
    /// Julian Date outside the range representable as a calendar date-time.
    #[error("julian date {0} is outside the representable range")]
    OutOfRange(f64),
}
