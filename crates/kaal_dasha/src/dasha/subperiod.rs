//! Sub-period generation: Antardashas within a Mahadasha and
//! Pratyantardashas within an Antardasha.
//!
//! Children start with the parent's own graha and follow the cyclic order.
//! Child `i` gets `parent_duration * years_i / 120`; boundaries come from the
//! cumulative share and the last child ends exactly at the parent's end.

use tracing::{error, trace};

use crate::error::DashaError;

use super::types::{DashaLevel, DashaPeriod};
use super::vimshottari_data::{VIMSHOTTARI_TOTAL_YEARS, cyclic_sequence_from, vimshottari_years};

/// Generate the nine proportional children of `parent`.
///
/// Returns an empty vector for a leaf-level parent.
pub fn proportional_children(parent: &DashaPeriod) -> Vec<DashaPeriod> {
    let child_level = match parent.level.child_level() {
        Some(l) => l,
        None => return Vec::new(),
    };
    let parent_duration = parent.duration_days();
    let sequence = cyclic_sequence_from(parent.graha);
    let last = sequence.len() - 1;

    let mut children = Vec::with_capacity(sequence.len());
    let mut cumulative_years = 0.0;
    let mut cursor = parent.start_jd;

    for (order_0, &graha) in sequence.iter().enumerate() {
        cumulative_years += vimshottari_years(graha);
        let end = if order_0 == last {
            parent.end_jd
        } else {
            parent.start_jd + parent_duration * (cumulative_years / VIMSHOTTARI_TOTAL_YEARS)
        };
        children.push(DashaPeriod::new(
            graha,
            child_level,
            cursor,
            end,
            (order_0 as u16) + 1,
        ));
        cursor = end;
    }

    children
}

/// Generate the children of `parent` and check that they tile it.
pub fn checked_children(parent: &DashaPeriod) -> Result<Vec<DashaPeriod>, DashaError> {
    let children = proportional_children(parent);
    verify_children(parent, &children)?;
    Ok(children)
}

/// Fill in `parent.children` down to the leaf level.
pub fn subdivide(parent: &mut DashaPeriod) -> Result<(), DashaError> {
    let mut children = checked_children(parent)?;
    for child in &mut children {
        subdivide(child)?;
    }
    trace!(
        level = %parent.level,
        order = parent.order,
        graha = %parent.graha,
        children = children.len(),
        "subdivided period"
    );
    parent.children = children;
    Ok(())
}

/// Check the partition invariants of `parent` against its stored children.
pub fn verify_partition(parent: &DashaPeriod) -> Result<(), DashaError> {
    verify_children(parent, &parent.children)
}

/// Check that `children` exactly tile `[parent.start_jd, parent.end_jd)`.
///
/// Boundaries are compared with exact equality.
pub fn verify_children(parent: &DashaPeriod, children: &[DashaPeriod]) -> Result<(), DashaError> {
    let violation = |reason: &'static str| {
        error!(
            level = %parent.level,
            order = parent.order,
            graha = %parent.graha,
            start_jd = parent.start_jd,
            end_jd = parent.end_jd,
            reason,
            "dasha partition invariant violated"
        );
        DashaError::InternalInvariantViolation {
            level: parent.level,
            order: parent.order,
            reason,
        }
    };

    if !has_positive_span(parent) {
        return Err(violation("period end does not follow its start"));
    }

    let child_level = match parent.level.child_level() {
        Some(l) => l,
        None if children.is_empty() => return Ok(()),
        None => return Err(violation("leaf period has children")),
    };

    let (first, last) = match (children.first(), children.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(violation("period has no children")),
    };
    if children.len() != 9 {
        return Err(violation("period does not have nine children"));
    }
    if first.start_jd != parent.start_jd {
        return Err(violation("first child does not start at parent start"));
    }
    if last.end_jd != parent.end_jd {
        return Err(violation("last child does not end at parent end"));
    }
    if children.windows(2).any(|pair| pair[0].end_jd != pair[1].start_jd) {
        return Err(violation("gap or overlap between adjacent children"));
    }
    if !children.iter().all(has_positive_span) {
        return Err(violation("child period is empty"));
    }
    if children.iter().any(|c| c.level != child_level) {
        return Err(violation("child has the wrong level"));
    }
    Ok(())
}

/// `end_jd > start_jd`; false for NaN boundaries.
fn has_positive_span(period: &DashaPeriod) -> bool {
    period.end_jd > period.start_jd
}

/// Check that top-level periods are non-empty and chained end to start.
pub fn verify_sequence(periods: &[DashaPeriod]) -> Result<(), DashaError> {
    let violation = |p: &DashaPeriod, reason: &'static str| {
        error!(order = p.order, graha = %p.graha, reason, "dasha sequence invariant violated");
        DashaError::InternalInvariantViolation {
            level: DashaLevel::Mahadasha,
            order: p.order,
            reason,
        }
    };
    if let Some(p) = periods.iter().find(|p| !has_positive_span(p)) {
        return Err(violation(p, "period end does not follow its start"));
    }
    if let Some(pair) = periods.windows(2).find(|pair| pair[0].end_jd != pair[1].start_jd) {
        return Err(violation(&pair[1], "gap or overlap between adjacent periods"));
    }
    Ok(())
}
