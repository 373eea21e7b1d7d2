/// Calendar <-> Julian Day conversion and the "now" source
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// JD of 2000-01-01 12:00 TT
pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day for a proleptic Gregorian date/time (UTC)
pub fn julian_day(dt: &NaiveDateTime) -> f64 {
    let (y, m) = if dt.month() <= 2 {
        (dt.year() as f64 - 1.0, dt.month() as f64 + 12.0)
    } else {
        (dt.year() as f64, dt.month() as f64)
    };

    let seconds = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 * 1e-9;
    let day = dt.day() as f64 + seconds / SECONDS_PER_DAY;

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Day at 00:00 UTC of a calendar date
pub fn julian_day_for_date(date: NaiveDate) -> f64 {
    julian_day(&date.and_time(NaiveTime::MIN))
}

/// Julian centuries since J2000
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Inverse of [`julian_day`], rounded to the nearest second.
///
/// Returns `None` only outside chrono's representable range.
pub fn from_julian_day(jd: f64) -> Option<NaiveDateTime> {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    let midnight = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?
        .and_time(NaiveTime::MIN);
    let seconds = (f * SECONDS_PER_DAY).round() as i64;
    midnight.checked_add_signed(chrono::Duration::seconds(seconds))
}

/// Source of "now" for requests that carry no explicit date
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock, UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Frozen clock
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
