//! Point-in-time queries over sorted, non-overlapping period lists.

use super::types::DashaPeriod;

/// Active periods at one instant, outermost first.
///
/// A level is `None` when the instant lies outside the generated horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActiveChain<'a> {
    pub mahadasha: Option<&'a DashaPeriod>,
    pub antardasha: Option<&'a DashaPeriod>,
    pub pratyantardasha: Option<&'a DashaPeriod>,
}

impl ActiveChain<'_> {
    /// Whether any period is active.
    pub fn is_empty(&self) -> bool {
        self.mahadasha.is_none()
    }
}

/// Index of the period containing `jd` (binary search, `[start, end)`).
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    if jd.is_nan() {
        return None;
    }
    let idx = periods.partition_point(|p| p.end_jd <= jd);
    let period = periods.get(idx)?;
    (period.start_jd <= jd).then_some(idx)
}

/// Index of the first period starting strictly after `jd`.
pub fn find_next_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    if jd.is_nan() {
        return None;
    }
    let idx = periods.partition_point(|p| p.start_jd <= jd);
    (idx < periods.len()).then_some(idx)
}

/// Walk Mahadasha -> Antardasha -> Pratyantardasha for `jd`.
pub fn active_chain(mahadashas: &[DashaPeriod], jd: f64) -> ActiveChain<'_> {
    let mahadasha = find_active_period(mahadashas, jd).map(|i| &mahadashas[i]);
    let antardasha =
        mahadasha.and_then(|md| find_active_period(&md.children, jd).map(|i| &md.children[i]));
    let pratyantardasha =
        antardasha.and_then(|ad| find_active_period(&ad.children, jd).map(|i| &ad.children[i]));
    ActiveChain {
        mahadasha,
        antardasha,
        pratyantardasha,
    }
}

/// Elapsed share of `period` at `jd`, clamped to [0, 100].
pub fn progress_percent(period: &DashaPeriod, jd: f64) -> f64 {
    let duration = period.duration_days();
    if jd.is_nan() || duration <= 0.0 {
        return 0.0;
    }
    ((jd - period.start_jd) / duration * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::types::DashaLevel;
    use crate::graha::Graha;

    fn periods() -> Vec<DashaPeriod> {
        vec![
            DashaPeriod::new(Graha::Ketu, DashaLevel::Mahadasha, 0.0, 10.0, 1),
            DashaPeriod::new(Graha::Shukra, DashaLevel::Mahadasha, 10.0, 30.0, 2),
            DashaPeriod::new(Graha::Surya, DashaLevel::Mahadasha, 30.0, 36.0, 3),
        ]
    }

    #[test]
    fn finds_containing_period() {
        let p = periods();
        assert_eq!(find_active_period(&p, 0.0), Some(0));
        assert_eq!(find_active_period(&p, 9.999), Some(0));
        assert_eq!(find_active_period(&p, 10.0), Some(1));
        assert_eq!(find_active_period(&p, 35.0), Some(2));
    }

    #[test]
    fn outside_horizon_is_none() {
        let p = periods();
        assert_eq!(find_active_period(&p, -0.001), None);
        assert_eq!(find_active_period(&p, 36.0), None);
        assert_eq!(find_active_period(&p, f64::NAN), None);
        assert_eq!(find_active_period(&[], 1.0), None);
    }

    #[test]
    fn next_period_is_strictly_later() {
        let p = periods();
        assert_eq!(find_next_period(&p, -5.0), Some(0));
        assert_eq!(find_next_period(&p, 0.0), Some(1));
        assert_eq!(find_next_period(&p, 10.0), Some(2));
        assert_eq!(find_next_period(&p, 30.0), None);
        assert_eq!(find_next_period(&p, 100.0), None);
    }

    #[test]
    fn chain_without_children_stops_at_mahadasha() {
        let p = periods();
        let chain = active_chain(&p, 12.0);
        assert_eq!(chain.mahadasha.map(|m| m.graha), Some(Graha::Shukra));
        assert!(chain.antardasha.is_none());
        assert!(active_chain(&p, 40.0).is_empty());
    }

    #[test]
    fn progress_boundaries() {
        let p = &periods()[1];
        assert_eq!(progress_percent(p, 10.0), 0.0);
        assert!((progress_percent(p, 20.0) - 50.0).abs() < 1e-12);
        assert!(progress_percent(p, 30.0 - 1e-9) > 99.999_999);
        assert_eq!(progress_percent(p, 5.0), 0.0);
        assert_eq!(progress_percent(p, 50.0), 100.0);
        assert_eq!(progress_percent(p, f64::NAN), 0.0);
    }
}
