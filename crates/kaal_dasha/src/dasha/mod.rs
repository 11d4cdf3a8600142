//! Vimshottari dasha (planetary period) calculations.
//!
//! Builds the 120-year cycle of Mahadashas from the birth Moon's nakshatra,
//! subdivides each into Antardashas and Pratyantardashas, and answers
//! point-in-time queries against the result.
//!
//! Two computation paths:
//! - Full hierarchy: every period down to Pratyantardasha (see `Timeline`)
//! - Snapshot: only the chain of periods active at one instant

pub mod balance;
pub mod query;
pub mod sequence;
pub mod snapshot;
pub mod subperiod;
pub mod types;
pub mod vimshottari_data;

pub use balance::{DashaBalance, nakshatra_birth_balance};
pub use query::{ActiveChain, active_chain, find_active_period, find_next_period, progress_percent};
pub use sequence::{mahadasha_sequence, validate_horizon};
pub use snapshot::{snapshot_from_chain, snapshot_from_level0, vimshottari_snapshot};
pub use subperiod::{
    checked_children, proportional_children, subdivide, verify_children, verify_partition,
    verify_sequence,
};
pub use types::{
    DAYS_PER_YEAR, DEFAULT_HORIZON_YEARS, DashaLevel, DashaPeriod, DashaSnapshot,
    MAX_DASHA_LEVEL, MAX_HORIZON_YEARS,
};
pub use vimshottari_data::{
    VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS, VIMSHOTTARI_YEARS, cyclic_sequence_from,
    full_period_days, nakshatra_lord, next_in_sequence, sequence_position, vimshottari_years,
};
