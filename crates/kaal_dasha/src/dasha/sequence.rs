//! Mahadasha sequence generation.
//!
//! The first Mahadasha ends `balance_years` after birth and starts
//! `elapsed_years` before it, so it keeps its full classical length. Later
//! Mahadashas follow in cyclic order, end to end, until the horizon past
//! birth is covered.

use tracing::debug;

use crate::error::DashaError;

use super::balance::DashaBalance;
use super::types::{DAYS_PER_YEAR, DashaLevel, DashaPeriod, MAX_HORIZON_YEARS};
use super::vimshottari_data::{next_in_sequence, vimshottari_years};

/// Reject horizons that are not finite, not positive, or beyond `MAX_HORIZON_YEARS`.
pub fn validate_horizon(horizon_years: f64) -> Result<(), DashaError> {
    if horizon_years.is_finite() && horizon_years > 0.0 && horizon_years <= MAX_HORIZON_YEARS {
        Ok(())
    } else {
        Err(DashaError::InvalidHorizon(horizon_years))
    }
}

/// Generate the Mahadasha periods (without children) covering
/// `horizon_years` from `birth_jd`.
///
/// Boundaries after the first are `first_end + cumulative_years * DAYS_PER_YEAR`,
/// so every boundary is rounded once and adjacent periods share it exactly.
pub fn mahadasha_sequence(
    balance: &DashaBalance,
    birth_jd: f64,
    horizon_years: f64,
) -> Result<Vec<DashaPeriod>, DashaError> {
    validate_horizon(horizon_years)?;
    if !birth_jd.is_finite() {
        return Err(DashaError::InvalidBirthData("birth instant is not finite"));
    }

    let first_end = birth_jd + balance.balance_years * DAYS_PER_YEAR;
    let first_start = birth_jd - balance.elapsed_years * DAYS_PER_YEAR;

    let estimated = (horizon_years / 120.0).ceil() as usize * 9 + 1;
    let mut periods = Vec::with_capacity(estimated);
    periods.push(DashaPeriod::new(
        balance.graha,
        DashaLevel::Mahadasha,
        first_start,
        first_end,
        1,
    ));

    let mut graha = balance.graha;
    let mut covered_years = balance.balance_years;
    let mut whole_years_after_first = 0.0;
    let mut cursor = first_end;

    while covered_years < horizon_years {
        graha = next_in_sequence(graha);
        let years = vimshottari_years(graha);
        whole_years_after_first += years;
        covered_years += years;

        let end = first_end + whole_years_after_first * DAYS_PER_YEAR;
        let order = (periods.len() + 1) as u16;
        periods.push(DashaPeriod::new(graha, DashaLevel::Mahadasha, cursor, end, order));
        cursor = end;
    }

    debug!(
        first = %balance.graha,
        count = periods.len(),
        covered_years,
        "generated mahadasha sequence"
    );
    Ok(periods)
}
