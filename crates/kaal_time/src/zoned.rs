//! Bridge between chrono zoned date-times and Julian Dates (UTC).
//!
//! The dasha engine works in JD UTC; user-facing values carry a fixed UTC
//! offset (the chart timezone). Conversion back to a calendar value is
//! millisecond resolution.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

const MILLIS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Naive date-time layouts accepted by [`parse_datetime`], most specific first.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Julian Date (UTC) of a zoned date-time.
pub fn jd_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.naive_utc();
    let seconds =
        utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 / 1_000_000_000.0;
    calendar_to_jd(utc.year(), utc.month(), utc.day() as f64 + seconds / SECONDS_PER_DAY)
}

/// Date-time at `jd` (UTC) expressed in `offset`.
pub fn datetime_from_jd(jd: f64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let (year, month, day_frac) = jd_to_calendar(jd);
    let day = day_frac.floor();
    let millis = ((day_frac - day) * MILLIS_PER_DAY).round() as i64;

    let midnight = NaiveDate::from_ymd_opt(year, month, day as u32)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(TimeError::OutOfRange(jd))?;
    let naive = midnight
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or(TimeError::OutOfRange(jd))?;
    Ok(offset.from_utc_datetime(&naive))
}

/// Current instant as JD UTC.
pub fn now_jd() -> f64 {
    jd_from_datetime(&Utc::now())
}

/// Parse a UTC offset: `Z`, `UTC`, `+05:30`, `-0800`, `+09`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset, TimeError> {
    let invalid = || TimeError::InvalidOffset(text.to_string());
    let s = text.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if (digits.len() != 2 && digits.len() != 4) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| invalid())?
    } else {
        0
    };
    if hours > 18 || minutes > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Parse a date-time.
///
/// RFC 3339 text keeps its own offset. Naive `YYYY-MM-DDThh:mm[:ss]` and
/// bare `YYYY-MM-DD` values are interpreted in `default_offset`.
pub fn parse_datetime(
    text: &str,
    default_offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimeError> {
    let s = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimeError::InvalidDateTime(text.to_string()))?;

    default_offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeError::InvalidDateTime(text.to_string()))
}
