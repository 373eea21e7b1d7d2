/// Low-order solar ephemeris, arc-minute level around J2000
use crate::domain::SolarEphemeris;
use crate::time::julian_centuries;
use crate::utils::{normalize_degrees, wrap_degrees_180};

/// Minutes of time per degree of hour angle
const MINUTES_PER_DEGREE: f64 = 4.0;
/// Aberration correction folded into the equation of time
const ABERRATION_DEG: f64 = 0.005_718_3;

pub fn mean_anomaly(t: f64) -> f64 {
    normalize_degrees(357.5291 + 35_999.0503 * t)
}

pub fn mean_longitude(t: f64) -> f64 {
    normalize_degrees(280.4665 + 36_000.7698 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t).to_radians();
    (1.914_602 - t * (0.004_817 + t * 0.000_014)) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin()
}

pub fn obliquity(t: f64) -> f64 {
    23.4393 - 0.000_000_4 * t
}

/// Declination, right ascension and equation of time for a Julian Day
pub fn solar_ephemeris(jd: f64) -> SolarEphemeris {
    let t = julian_centuries(jd);
    let l0 = mean_longitude(t);
    let true_longitude = (l0 + equation_of_center(t)).to_radians();
    let eps = obliquity(t).to_radians();

    let ra = (eps.cos() * true_longitude.sin()).atan2(true_longitude.cos());
    let right_ascension_deg = normalize_degrees(ra.to_degrees());
    let declination_deg = (eps.sin() * true_longitude.sin()).asin().to_degrees();

    let equation_of_time_min =
        MINUTES_PER_DEGREE * wrap_degrees_180(l0 - ABERRATION_DEG - right_ascension_deg);

    SolarEphemeris {
        declination_deg,
        right_ascension_deg,
        equation_of_time_min,
    }
}
