//! The dasha timeline: an immutable three-level hierarchy built once per
//! birth chart, plus the query surface used by presentation code.
//!
//! A `Timeline` never changes after construction. When the birth chart
//! changes a new one is generated and the old one dropped.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use kaal_time::{datetime_from_jd, jd_from_datetime};
use tracing::debug;

use crate::dasha::balance::{DashaBalance, nakshatra_birth_balance};
use crate::dasha::query::{ActiveChain, active_chain, find_next_period, progress_percent};
use crate::dasha::sequence::mahadasha_sequence;
use crate::dasha::snapshot::snapshot_from_chain;
use crate::dasha::subperiod::{subdivide, verify_sequence};
use crate::dasha::types::{DEFAULT_HORIZON_YEARS, DashaLevel, DashaPeriod, DashaSnapshot};
use crate::error::DashaError;
use crate::graha::Graha;
use crate::nakshatra::BirthMoonPosition;

/// Everything needed to generate a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRequest {
    /// Birth Moon position from the ephemeris.
    pub moon: BirthMoonPosition,
    /// Birth instant, JD UTC.
    pub birth_jd: f64,
    /// Chart timezone, used to present instants and resolve "now".
    pub timezone: FixedOffset,
    /// Years past birth that must be covered.
    pub horizon_years: f64,
}

impl TimelineRequest {
    /// Request with the default 120-year horizon.
    pub fn new(moon: BirthMoonPosition, birth_jd: f64, timezone: FixedOffset) -> Self {
        Self {
            moon,
            birth_jd,
            timezone,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }

    /// Same request with a different horizon.
    pub fn with_horizon(mut self, horizon_years: f64) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    /// Build the full Mahadasha -> Antardasha -> Pratyantardasha hierarchy.
    ///
    /// All or nothing: any failure aborts generation.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(birth_jd = self.birth_jd, horizon_years = self.horizon_years)
    )]
    pub fn generate(&self) -> Result<Timeline, DashaError> {
        let balance = nakshatra_birth_balance(&self.moon)?;
        debug!(
            nakshatra = balance.nakshatra.name(),
            graha = %balance.graha,
            elapsed_fraction = balance.elapsed_fraction,
            balance_years = balance.balance_years,
            "resolved birth balance"
        );

        let mut mahadashas = mahadasha_sequence(&balance, self.birth_jd, self.horizon_years)?;
        verify_sequence(&mahadashas)?;
        for md in &mut mahadashas {
            subdivide(md)?;
        }

        debug!(mahadashas = mahadashas.len(), "timeline generated");
        Ok(Timeline {
            birth_jd: self.birth_jd,
            timezone: self.timezone,
            horizon_years: self.horizon_years,
            balance,
            mahadashas,
        })
    }
}

/// Generate a timeline from a zoned birth date-time.
pub fn generate_timeline<Tz: TimeZone>(
    moon: &BirthMoonPosition,
    birth: &DateTime<Tz>,
    timezone: FixedOffset,
    horizon_years: f64,
) -> Result<Timeline, DashaError> {
    TimelineRequest::new(*moon, jd_from_datetime(birth), timezone)
        .with_horizon(horizon_years)
        .generate()
}

/// Immutable Vimshottari timeline for one birth chart.
///
/// Covers `[start_jd, end_jd)`: from the start of the first Mahadasha
/// (before birth when part of it had already elapsed) to at least
/// `horizon_years` past birth.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    birth_jd: f64,
    timezone: FixedOffset,
    horizon_years: f64,
    balance: DashaBalance,
    mahadashas: Vec<DashaPeriod>,
}

impl Timeline {
    /// Mahadashas in chronological order, each with its full sub-hierarchy.
    pub fn mahadashas(&self) -> &[DashaPeriod] {
        &self.mahadashas
    }

    pub fn birth_jd(&self) -> f64 {
        self.birth_jd
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn horizon_years(&self) -> f64 {
        self.horizon_years
    }

    /// Birth balance the first Mahadasha was sized from.
    pub fn balance(&self) -> &DashaBalance {
        &self.balance
    }

    /// Start of the first Mahadasha.
    pub fn start_jd(&self) -> f64 {
        self.mahadashas.first().map_or(self.birth_jd, |p| p.start_jd)
    }

    /// End (exclusive) of the last Mahadasha.
    pub fn end_jd(&self) -> f64 {
        self.mahadashas.last().map_or(self.birth_jd, |p| p.end_jd)
    }

    /// Whether `jd` has computed periods.
    pub fn covers(&self, jd: f64) -> bool {
        self.start_jd() <= jd && jd < self.end_jd()
    }

    /// Active Mahadasha, Antardasha and Pratyantardasha at `jd`.
    pub fn active_chain(&self, jd: f64) -> ActiveChain<'_> {
        active_chain(&self.mahadashas, jd)
    }

    pub fn current_mahadasha(&self, jd: f64) -> Option<&DashaPeriod> {
        self.active_chain(jd).mahadasha
    }

    pub fn current_antardasha(&self, jd: f64) -> Option<&DashaPeriod> {
        self.active_chain(jd).antardasha
    }

    pub fn current_pratyantardasha(&self, jd: f64) -> Option<&DashaPeriod> {
        self.active_chain(jd).pratyantardasha
    }

    /// Active period at `level`.
    pub fn current_at_level(&self, jd: f64, level: DashaLevel) -> Option<&DashaPeriod> {
        let chain = self.active_chain(jd);
        match level {
            DashaLevel::Mahadasha => chain.mahadasha,
            DashaLevel::Antardasha => chain.antardasha,
            DashaLevel::Pratyantardasha => chain.pratyantardasha,
        }
    }

    /// First Mahadasha starting strictly after `jd`.
    ///
    /// `None` once `jd` is within or past the last generated Mahadasha;
    /// regenerate with a longer horizon to see further.
    pub fn next_mahadasha(&self, jd: f64) -> Option<&DashaPeriod> {
        find_next_period(&self.mahadashas, jd).map(|i| &self.mahadashas[i])
    }

    /// All Mahadashas ruled by `graha`, in order.
    pub fn mahadashas_of(&self, graha: Graha) -> impl Iterator<Item = &DashaPeriod> {
        self.mahadashas.iter().filter(move |p| p.graha == graha)
    }

    /// Active periods at `jd` as a childless snapshot.
    pub fn snapshot(&self, jd: f64) -> DashaSnapshot {
        snapshot_from_chain(&self.active_chain(jd), jd)
    }

    /// Resolve all queries for one reference instant.
    pub fn view_at(&self, jd: f64) -> TimelineView<'_> {
        TimelineView::new(self, jd)
    }

    /// `jd` as a date-time in the chart timezone.
    pub fn local_datetime(&self, jd: f64) -> Result<DateTime<FixedOffset>, DashaError> {
        Ok(datetime_from_jd(jd, self.timezone)?)
    }

    /// Current wall-clock time in the chart timezone.
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Query results for one reference instant, resolved once.
///
/// This is the read-only value handed to rendering code.
#[derive(Debug, Clone, Copy)]
pub struct TimelineView<'a> {
    timeline: &'a Timeline,
    reference_jd: f64,
    chain: ActiveChain<'a>,
    next_mahadasha: Option<&'a DashaPeriod>,
    progress: [Option<f64>; 3],
}

impl<'a> TimelineView<'a> {
    fn new(timeline: &'a Timeline, reference_jd: f64) -> Self {
        let chain = timeline.active_chain(reference_jd);
        let progress = [chain.mahadasha, chain.antardasha, chain.pratyantardasha]
            .map(|p| p.map(|p| progress_percent(p, reference_jd)));
        Self {
            timeline,
            reference_jd,
            chain,
            next_mahadasha: timeline.next_mahadasha(reference_jd),
            progress,
        }
    }

    pub fn timeline(&self) -> &'a Timeline {
        self.timeline
    }

    pub fn reference_jd(&self) -> f64 {
        self.reference_jd
    }

    pub fn chain(&self) -> ActiveChain<'a> {
        self.chain
    }

    pub fn mahadasha(&self) -> Option<&'a DashaPeriod> {
        self.chain.mahadasha
    }

    pub fn antardasha(&self) -> Option<&'a DashaPeriod> {
        self.chain.antardasha
    }

    pub fn pratyantardasha(&self) -> Option<&'a DashaPeriod> {
        self.chain.pratyantardasha
    }

    pub fn next_mahadasha(&self) -> Option<&'a DashaPeriod> {
        self.next_mahadasha
    }

    /// Progress through the active period at `level`, in [0, 100].
    pub fn progress(&self, level: DashaLevel) -> Option<f64> {
        self.progress[level as usize]
    }

    /// Whether the reference instant has no computed periods.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
