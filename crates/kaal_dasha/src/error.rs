//! Error types for dasha timeline generation.

use kaal_time::TimeError;

use crate::dasha::types::{DashaLevel, MAX_HORIZON_YEARS};

/// Errors from dasha timeline construction.
///
/// Queries never fail: an instant outside the generated horizon simply has
/// no active period.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DashaError {
    /// Malformed or out-of-range birth Moon position or birth instant.
    #[error("invalid birth data: {0}")]
    InvalidBirthData(&'static str),

    /// Requested horizon is not a usable number of years.
    #[error(
        "invalid horizon: {0} years (must be finite, positive and at most {max})",
        max = MAX_HORIZON_YEARS
    )]
    InvalidHorizon(f64),

    /// Generated periods do not tile their parent exactly.
    #[error("internal invariant violated in {level} #{order}: {reason}")]
    InternalInvariantViolation {
        /// Level of the parent whose partition is broken.
        level: DashaLevel,
        /// 1-based order of that parent among its siblings.
        order: u16,
        /// Which invariant failed.
        reason: &'static str,
    },

    /// Date-time conversion failed.
    #[error(transparent)]
    Time(#[from] TimeError),
}

impl DashaError {
    /// Whether the error is shown as a generic calculation failure with a
    /// retry option, rather than asking for corrected birth data.
    ///
    /// Generation is deterministic: retrying an invariant violation with
    /// unchanged input fails the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InternalInvariantViolation { .. })
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidBirthData(_) | Self::Time(_) => {
                "Unable to calculate dasha periods, check birth data."
            }
            Self::InvalidHorizon(_) => "Unable to calculate dasha periods for this time span.",
            Self::InternalInvariantViolation { .. } => {
                "Dasha calculation failed, please try again."
            }
        }
    }
}
