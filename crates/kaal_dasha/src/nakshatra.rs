//! Nakshatra (lunar mansion) identities and the birth Moon position.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each. The ephemeris reports the birth Moon as a
//! nakshatra index plus the degrees already traversed inside it.

use serde::Serialize;

use crate::dasha::vimshottari_data::nakshatra_lord;
use crate::error::DashaError;
use crate::graha::Graha;

/// Span of one nakshatra in the 27-scheme: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Slack allowed past the nakshatra span for ephemeris rounding.
pub const SPAN_TOLERANCE_DEG: f64 = 1e-9;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Nakshatra at a 0-based index, if in range.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_NAKSHATRAS_27.get(index as usize).copied()
    }

    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Ruling graha of this nakshatra in the Vimshottari system.
    pub const fn vimshottari_lord(self) -> Graha {
        nakshatra_lord(self.index())
    }
}

/// Birth Moon position as reported by the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthMoonPosition {
    /// 0-based nakshatra index, 0..=26.
    pub nakshatra_index: u8,
    /// Degrees already traversed within the nakshatra, [0, 13.333...].
    pub degrees_elapsed: f64,
}

impl BirthMoonPosition {
    pub fn new(nakshatra_index: u8, degrees_elapsed: f64) -> Self {
        Self {
            nakshatra_index,
            degrees_elapsed,
        }
    }

    /// Split an absolute sidereal longitude into nakshatra and degrees elapsed.
    ///
    /// The longitude must lie in [0, 360); it is not normalized.
    pub fn from_sidereal_longitude(sidereal_lon_deg: f64) -> Result<Self, DashaError> {
        if !sidereal_lon_deg.is_finite() || !(0.0..360.0).contains(&sidereal_lon_deg) {
            return Err(DashaError::InvalidBirthData(
                "moon longitude outside [0, 360) degrees",
            ));
        }
        let nak_idx = ((sidereal_lon_deg / NAKSHATRA_SPAN_27).floor() as u8).min(26);
        let degrees_elapsed = (sidereal_lon_deg - nak_idx as f64 * NAKSHATRA_SPAN_27).max(0.0);
        Ok(Self::new(nak_idx, degrees_elapsed))
    }

    /// Absolute sidereal longitude of this position in degrees.
    pub fn sidereal_longitude(&self) -> f64 {
        self.nakshatra_index as f64 * NAKSHATRA_SPAN_27 + self.degrees_elapsed
    }

    /// The nakshatra, if the index is in range.
    pub fn nakshatra(&self) -> Option<Nakshatra> {
        Nakshatra::from_index(self.nakshatra_index)
    }

    /// Check the position against the nakshatra and ecliptic bounds.
    pub fn validate(&self) -> Result<(), DashaError> {
        if self.nakshatra().is_none() {
            return Err(DashaError::InvalidBirthData(
                "nakshatra index outside 0..=26",
            ));
        }
        if !self.degrees_elapsed.is_finite() {
            return Err(DashaError::InvalidBirthData(
                "degrees elapsed in nakshatra is not finite",
            ));
        }
        if self.degrees_elapsed < 0.0 {
            return Err(DashaError::InvalidBirthData(
                "degrees elapsed in nakshatra is negative",
            ));
        }
        if self.degrees_elapsed > NAKSHATRA_SPAN_27 + SPAN_TOLERANCE_DEG {
            return Err(DashaError::InvalidBirthData(
                "degrees elapsed exceeds the nakshatra span",
            ));
        }
        // Revati closes the circle: its span end is 360 degrees, excluded.
        if self.nakshatra_index == 26 && self.degrees_elapsed >= NAKSHATRA_SPAN_27 {
            return Err(DashaError::InvalidBirthData(
                "moon longitude outside [0, 360) degrees",
            ));
        }
        Ok(())
    }
}
