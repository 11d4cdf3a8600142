//! Julian Date <-> calendar conversions (proleptic Gregorian calendar).
//!
//! Algorithms follow Meeus, *Astronomical Algorithms*, ch. 7.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` carries the time of day as a fraction (e.g. `1.5` = noon on the 1st).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let y = year as f64;
    let m = month as f64;
    let (y2, m2) = if m <= 2.0 { (y - 1.0, m + 12.0) } else { (y, m) };
    let a = (y2 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y2 + 4716.0)).floor() + (30.6001 * (m2 + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Date back to `(year, month, day_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}
