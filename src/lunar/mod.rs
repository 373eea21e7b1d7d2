/// Mean-synodic-month moon phase model
use crate::domain::{MoonPhase, PhaseName};
use crate::time::{from_julian_day, julian_day};
use chrono::{Duration, NaiveDateTime};

pub const SYNODIC_MONTH_DAYS: f64 = 29.530_59;
pub const HALF_SYNODIC_MONTH_DAYS: f64 = SYNODIC_MONTH_DAYS / 2.0;
/// New moon of 2000-01-06
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_549.5;

/// Upper (exclusive) age bound of each phase, in cycle order.
/// Ages at or past the last bound wrap back to `NewMoon`.
pub const PHASE_AGE_BOUNDS: [(f64, PhaseName); 8] = [
    (1.845_66, PhaseName::NewMoon),
    (5.536_99, PhaseName::WaxingCrescent),
    (9.228_31, PhaseName::FirstQuarter),
    (12.919_63, PhaseName::WaxingGibbous),
    (16.610_96, PhaseName::FullMoon),
    (20.302_28, PhaseName::WaningGibbous),
    (23.993_61, PhaseName::LastQuarter),
    (27.684_93, PhaseName::WaningCrescent),
];

/// Moon age in days, always in `[0, SYNODIC_MONTH_DAYS)`
pub fn moon_age_days(jd: f64) -> f64 {
    let age = (jd - REFERENCE_NEW_MOON_JD).rem_euclid(SYNODIC_MONTH_DAYS);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if age >= SYNODIC_MONTH_DAYS {
        0.0
    } else {
        age
    }
}

pub fn phase_for_age(age_days: f64) -> PhaseName {
    PHASE_AGE_BOUNDS
        .iter()
        .find(|(upper, _)| age_days < *upper)
        .map(|(_, phase)| *phase)
        .unwrap_or(PhaseName::NewMoon)
}

/// Linear in age: 0 at new, 100 at half a cycle, back to 0 at the next new moon
pub fn illumination_percent(age_days: f64) -> f64 {
    let pct = if age_days <= HALF_SYNODIC_MONTH_DAYS {
        age_days / HALF_SYNODIC_MONTH_DAYS * 100.0
    } else {
        (SYNODIC_MONTH_DAYS - age_days) / HALF_SYNODIC_MONTH_DAYS * 100.0
    };
    pct.clamp(0.0, 100.0)
}

/// Days until the next new moon, in `(0, SYNODIC_MONTH_DAYS]`
pub fn days_until_new_moon(age_days: f64) -> f64 {
    SYNODIC_MONTH_DAYS - age_days
}

/// Days until the next full moon, in `(0, SYNODIC_MONTH_DAYS]`
pub fn days_until_full_moon(age_days: f64) -> f64 {
    let offset = HALF_SYNODIC_MONTH_DAYS - age_days;
    if offset <= 0.0 {
        offset + SYNODIC_MONTH_DAYS
    } else {
        offset
    }
}

/// Event instant rounded to the second, kept strictly after `instant`
fn project(instant: &NaiveDateTime, jd: f64, offset_days: f64) -> NaiveDateTime {
    // only unrepresentable at the far end of chrono's range
    let projected = from_julian_day(jd + offset_days).unwrap_or(NaiveDateTime::MAX);
    if projected > *instant {
        return projected;
    }
    // the event is under half a second away and rounded onto or before the instant
    instant
        .checked_add_signed(Duration::seconds(1))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Phase, illumination and upcoming new/full moons for an instant (UTC)
pub fn moon_phase(instant: &NaiveDateTime) -> MoonPhase {
    let jd = julian_day(instant);
    let age_days = moon_age_days(jd);

    MoonPhase {
        phase_name: phase_for_age(age_days),
        illumination_percent: illumination_percent(age_days),
        age_days,
        next_new_moon: project(instant, jd, days_until_new_moon(age_days)),
        next_full_moon: project(instant, jd, days_until_full_moon(age_days)),
    }
}
