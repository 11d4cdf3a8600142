//! Core types for Vimshottari dasha periods.
//!
//! A dasha timeline is a three-level tree: each Mahadasha owns nine
//! Antardashas, each Antardasha owns nine Pratyantardashas. Periods are
//! half-open `[start_jd, end_jd)` intervals in JD UTC.

use serde::Serialize;

use crate::graha::Graha;

use super::query::progress_percent;

/// Year length for every dasha conversion: the mean Gregorian year.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Deepest level generated (0 = Mahadasha, 2 = Pratyantardasha).
pub const MAX_DASHA_LEVEL: u8 = 2;

/// Default horizon: one full Vimshottari cycle past birth.
pub const DEFAULT_HORIZON_YEARS: f64 = 120.0;

/// Upper bound on the horizon (ten full cycles).
pub const MAX_HORIZON_YEARS: f64 = 1200.0;

/// 3 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
}

impl DashaLevel {
    /// Create from raw u8 value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Mahadasha),
            1 => Some(Self::Antardasha),
            2 => Some(Self::Pratyantardasha),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }
}

impl std::fmt::Display for DashaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single dasha period and, above the leaf level, its sub-periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaPeriod {
    /// The graha ruling this period.
    pub graha: Graha,
    /// Hierarchical level.
    pub level: DashaLevel,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    /// 1-indexed position among siblings.
    pub order: u16,
    /// Sub-periods tiling `[start_jd, end_jd)`; empty at the leaf level
    /// and in snapshots.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// A period with no sub-periods yet.
    pub fn new(graha: Graha, level: DashaLevel, start_jd: f64, end_jd: f64, order: u16) -> Self {
        Self {
            graha,
            level,
            start_jd,
            end_jd,
            order,
            children: Vec::new(),
        }
    }

    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Duration of the period in dasha years.
    pub fn duration_years(&self) -> f64 {
        self.duration_days() / DAYS_PER_YEAR
    }

    /// Whether `jd` falls in `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// Elapsed share of this period at `jd`, in [0, 100].
    pub fn progress_percent(&self, jd: f64) -> f64 {
        progress_percent(self, jd)
    }

    /// Copy of this period without its sub-periods.
    pub fn without_children(&self) -> Self {
        Self::new(self.graha, self.level, self.start_jd, self.end_jd, self.order)
    }
}

/// Active periods at a specific instant (one per level, outermost first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaSnapshot {
    /// The queried JD UTC.
    pub query_jd: f64,
    /// Active periods without children: [0]=Mahadasha, [1]=Antardasha,
    /// [2]=Pratyantardasha. Empty when the instant is outside the horizon.
    pub periods: Vec<DashaPeriod>,
}

impl DashaSnapshot {
    /// Active period at `level`, if resolved.
    pub fn at_level(&self, level: DashaLevel) -> Option<&DashaPeriod> {
        self.periods.get(level as usize)
    }

    /// Whether no period was active at the query instant.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
