//! Time handling for the kaal dasha engine.
//!
//! This crate provides:
//! - Julian Date <-> calendar conversions
//! - Conversion between chrono zoned date-times and JD UTC
//! - Parsing of UTC offsets and birth/query date-times

pub mod error;
pub mod julian;
pub mod zoned;

pub use error::TimeError;
pub use julian::{J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar};
pub use zoned::{datetime_from_jd, jd_from_datetime, now_jd, parse_datetime, parse_utc_offset};

// Re-exported so downstream crates name offsets without a direct chrono dependency.
pub use chrono::{DateTime, FixedOffset};
