//! Snapshot-only path: active periods at one instant without materializing
//! the full hierarchy.
//!
//! Generates the Mahadasha list, then expands only the active chain.
//! O(levels * 9) sub-periods instead of O(9^levels) per Mahadasha.

use tracing::debug;

use crate::error::DashaError;
use crate::nakshatra::BirthMoonPosition;

use super::balance::nakshatra_birth_balance;
use super::query::{ActiveChain, find_active_period};
use super::sequence::mahadasha_sequence;
use super::subperiod::checked_children;
use super::types::{DashaPeriod, DashaSnapshot, MAX_DASHA_LEVEL};

/// Find the active Mahadasha, Antardasha and Pratyantardasha at `query_jd`.
#[tracing::instrument(level = "debug", skip(moon), fields(nakshatra = moon.nakshatra_index))]
pub fn vimshottari_snapshot(
    moon: &BirthMoonPosition,
    birth_jd: f64,
    query_jd: f64,
    horizon_years: f64,
) -> Result<DashaSnapshot, DashaError> {
    let balance = nakshatra_birth_balance(moon)?;
    let level0 = mahadasha_sequence(&balance, birth_jd, horizon_years)?;
    snapshot_from_level0(&level0, query_jd)
}

/// Drill down from a Mahadasha list, generating children only for the
/// active period at each level.
pub fn snapshot_from_level0(
    level0: &[DashaPeriod],
    query_jd: f64,
) -> Result<DashaSnapshot, DashaError> {
    let mut periods = Vec::with_capacity(MAX_DASHA_LEVEL as usize + 1);

    let mut current = match find_active_period(level0, query_jd) {
        Some(idx) => level0[idx].without_children(),
        None => {
            debug!(query_jd, "query instant outside generated horizon");
            return Ok(DashaSnapshot { query_jd, periods });
        }
    };

    loop {
        let mut children = checked_children(&current)?;
        let next = find_active_period(&children, query_jd).map(|idx| children.swap_remove(idx));
        periods.push(current);
        match next {
            Some(child) => current = child,
            None => break,
        }
    }

    Ok(DashaSnapshot { query_jd, periods })
}

/// Snapshot equivalent of an already-resolved chain.
pub fn snapshot_from_chain(chain: &ActiveChain<'_>, query_jd: f64) -> DashaSnapshot {
    let periods = [chain.mahadasha, chain.antardasha, chain.pratyantardasha]
        .into_iter()
        .map_while(|p| p.map(DashaPeriod::without_children))
        .collect();
    DashaSnapshot { query_jd, periods }
}
