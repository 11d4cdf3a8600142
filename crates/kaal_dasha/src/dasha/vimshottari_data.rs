//! Const data for the Vimshottari system: graha order, period lengths, and
//! the nakshatra-to-lord mapping.
//!
//! The nine periods sum to exactly 120 years; the cyclic order is fixed.

use crate::graha::Graha;

use super::types::DAYS_PER_YEAR;

/// Vimshottari graha sequence: Ketu, Shukra, Surya, Chandra, Mangal, Rahu, Guru, Shani, Buddh.
pub const VIMSHOTTARI_SEQUENCE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Vimshottari periods in years, aligned with `VIMSHOTTARI_SEQUENCE`.
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Length of one full cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Position of a graha in `VIMSHOTTARI_SEQUENCE`.
pub const fn sequence_position(graha: Graha) -> usize {
    match graha {
        Graha::Ketu => 0,
        Graha::Shukra => 1,
        Graha::Surya => 2,
        Graha::Chandra => 3,
        Graha::Mangal => 4,
        Graha::Rahu => 5,
        Graha::Guru => 6,
        Graha::Shani => 7,
        Graha::Buddh => 8,
    }
}

/// Full Mahadasha length of a graha in years.
pub const fn vimshottari_years(graha: Graha) -> f64 {
    VIMSHOTTARI_YEARS[sequence_position(graha)]
}

/// Full Mahadasha length of a graha in days.
pub fn full_period_days(graha: Graha) -> f64 {
    vimshottari_years(graha) * DAYS_PER_YEAR
}

/// The graha that follows `graha` in the cyclic order.
pub const fn next_in_sequence(graha: Graha) -> Graha {
    VIMSHOTTARI_SEQUENCE[(sequence_position(graha) + 1) % 9]
}

/// The nine grahas in cyclic order, starting with `graha` itself.
pub fn cyclic_sequence_from(graha: Graha) -> [Graha; 9] {
    let start = sequence_position(graha);
    std::array::from_fn(|i| VIMSHOTTARI_SEQUENCE[(start + i) % 9])
}

/// Vimshottari lord of the nakshatra at `nakshatra_index` (every 9th repeats).
pub const fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_SEQUENCE[(nakshatra_index % 9) as usize]
}
