//! Birth balance: how much of the first Mahadasha remains at birth.
//!
//! Computed from the Moon's position within its nakshatra. The fraction of
//! the nakshatra already traversed is the fraction of its lord's period
//! already elapsed.

use serde::Serialize;

use crate::error::DashaError;
use crate::graha::Graha;
use crate::nakshatra::{BirthMoonPosition, NAKSHATRA_SPAN_27, Nakshatra};

use super::types::DAYS_PER_YEAR;
use super::vimshottari_data::vimshottari_years;

/// Largest `f64` below 1.0; caps the elapsed fraction so it stays in [0, 1).
const MAX_ELAPSED_FRACTION: f64 = 1.0 - f64::EPSILON / 2.0;

/// Starting ruler and remaining share of its period at birth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashaBalance {
    /// Birth nakshatra of the Moon.
    pub nakshatra: Nakshatra,
    /// Lord of the birth nakshatra; rules the first Mahadasha.
    pub graha: Graha,
    /// Fraction of the nakshatra (and of the first Mahadasha) already elapsed, [0, 1).
    pub elapsed_fraction: f64,
    /// Years of the first Mahadasha already elapsed at birth.
    pub elapsed_years: f64,
    /// Remaining years of the first Mahadasha after birth.
    pub balance_years: f64,
    /// Remaining days of the first Mahadasha after birth.
    pub balance_days: f64,
}

/// Compute the Vimshottari birth balance from the Moon's nakshatra position.
pub fn nakshatra_birth_balance(moon: &BirthMoonPosition) -> Result<DashaBalance, DashaError> {
    moon.validate()?;
    let nakshatra = moon
        .nakshatra()
        .ok_or(DashaError::InvalidBirthData("nakshatra index outside 0..=26"))?;
    let graha = nakshatra.vimshottari_lord();

    let elapsed_fraction =
        (moon.degrees_elapsed / NAKSHATRA_SPAN_27).clamp(0.0, MAX_ELAPSED_FRACTION);
    let full_years = vimshottari_years(graha);
    let balance_years = (1.0 - elapsed_fraction) * full_years;

    Ok(DashaBalance {
        nakshatra,
        graha,
        elapsed_fraction,
        elapsed_years: elapsed_fraction * full_years,
        balance_years,
        balance_days: balance_years * DAYS_PER_YEAR,
    })
}
