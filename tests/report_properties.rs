use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sky_almanac::lunar::{HALF_SYNODIC_MONTH_DAYS, SYNODIC_MONTH_DAYS};
use sky_almanac::{compute_astronomy, AstroError, GeoCoordinate};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn coord(lat: f64, lon: f64) -> GeoCoordinate {
    GeoCoordinate::new(lat, lon).unwrap()
}

#[test]
fn test_identical_inputs_give_identical_output() {
    let c = coord(44.4280, -110.5885);
    let a = compute_astronomy(c, at(2024, 6, 25, 8), 2400.0).unwrap();
    let b = compute_astronomy(c, at(2024, 6, 25, 8), 2400.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_moon_phase_independent_of_wall_clock() {
    let c = coord(51.5, -0.1);
    let date = at(2025, 2, 14, 20);
    let first = compute_astronomy(c, date, 0.0).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1));
    let second = compute_astronomy(c, date, 0.0).unwrap();
    assert_eq!(first.moon, second.moon);
}

#[test]
fn test_moon_age_and_illumination_bounds_every_day() {
    let c = coord(0.0, 0.0);
    let start = at(2023, 1, 1, 0);
    for day in 0..(3 * 366) {
        let report = compute_astronomy(c, start + Duration::days(day), 0.0).unwrap();
        let moon = &report.moon;
        assert!(moon.age_days >= 0.0 && moon.age_days < SYNODIC_MONTH_DAYS);
        assert!((0.0..=100.0).contains(&moon.illumination_percent));
    }
}

#[test]
fn test_moon_bounds_across_centuries() {
    let c = coord(-45.0, 170.0);
    for year in [1601, 1800, 1900, 2100, 2500, 2999] {
        let report = compute_astronomy(c, at(year, 2, 28, 0), 0.0).unwrap();
        assert!(report.moon.age_days >= 0.0 && report.moon.age_days < SYNODIC_MONTH_DAYS);
        assert!((0.0..=100.0).contains(&report.moon.illumination_percent));
    }
}

#[test]
fn test_illumination_changes_at_most_one_slope_per_day() {
    let c = coord(30.0, 30.0);
    let start = at(2024, 1, 1, 0);
    let max_step = 100.0 / HALF_SYNODIC_MONTH_DAYS + 1e-6;
    let mut previous = compute_astronomy(c, start, 0.0).unwrap().moon.illumination_percent;
    for day in 1..400 {
        let current = compute_astronomy(c, start + Duration::days(day), 0.0)
            .unwrap()
            .moon
            .illumination_percent;
        assert!((current - previous).abs() <= max_step, "day {}", day);
        previous = current;
    }
}

#[test]
fn test_next_moons_strictly_future_within_one_cycle() {
    let c = coord(10.0, 10.0);
    let start = at(2024, 1, 1, 6);
    let cycle = Duration::seconds((SYNODIC_MONTH_DAYS * 86_400.0).ceil() as i64);
    for day in 0..120 {
        let date = start + Duration::hours(day * 7);
        let moon = compute_astronomy(c, date, 0.0).unwrap().moon;
        assert!(moon.next_new_moon > date && moon.next_new_moon <= date + cycle);
        assert!(moon.next_full_moon > date && moon.next_full_moon <= date + cycle);
    }
}

#[test]
fn test_equator_equinox_day_length_about_twelve_hours() {
    for lon in [-120.0, 0.0, 100.0] {
        let report = compute_astronomy(coord(0.0, lon), at(2024, 3, 20, 0), 0.0).unwrap();
        assert!(!report.sun.is_polar_day && !report.sun.is_polar_night);
        // refraction and the solar semidiameter add ~7 minutes
        assert!(
            (report.sun.day_length_hours - 12.0).abs() < 0.15,
            "{}",
            report.sun.day_length_hours
        );
    }
}

#[test]
fn test_polar_day_and_night_at_solstices() {
    let north = coord(72.0, 25.0);
    let south = coord(-72.0, 25.0);

    let june_north = compute_astronomy(north, at(2024, 6, 21, 0), 0.0).unwrap().sun;
    assert!(june_north.is_polar_day && !june_north.is_polar_night);
    assert!(june_north.sunrise_local.is_none() && june_north.sunset_local.is_none());

    let december_north = compute_astronomy(north, at(2024, 12, 21, 0), 0.0).unwrap().sun;
    assert!(december_north.is_polar_night && !december_north.is_polar_day);
    assert!(december_north.sunrise_local.is_none());

    let december_south = compute_astronomy(south, at(2024, 12, 21, 0), 0.0).unwrap().sun;
    assert!(december_south.is_polar_day);
    let june_south = compute_astronomy(south, at(2024, 6, 21, 0), 0.0).unwrap().sun;
    assert!(june_south.is_polar_night);
}

#[test]
fn test_exact_poles_and_equator_are_finite() {
    for lat in [-90.0, 0.0, 90.0] {
        for date in [at(2024, 3, 20, 0), at(2024, 6, 21, 0), at(2024, 12, 21, 0)] {
            let sun = compute_astronomy(coord(lat, 0.0), date, 0.0).unwrap().sun;
            assert!(sun.day_length_hours.is_finite());
            let has_times = sun.sunrise_local.is_some() && sun.sunset_local.is_some();
            let no_times = sun.sunrise_local.is_none() && sun.sunset_local.is_none();
            assert!(has_times || no_times);
            if no_times {
                assert!(sun.is_polar_day ^ sun.is_polar_night);
            } else {
                assert!(!sun.is_polar_day && !sun.is_polar_night);
            }
        }
    }
}

#[test]
fn test_yellowstone_late_june() {
    let report = compute_astronomy(coord(44.4280, -110.5885), at(2024, 6, 25, 0), 2400.0).unwrap();
    let sun = report.sun;
    assert!(!sun.is_polar_day && !sun.is_polar_night);
    assert!(sun.sunrise_local.unwrap() < NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    assert!(sun.sunset_local.unwrap() > NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    assert!(sun.day_length_hours > 15.0 && sun.day_length_hours < 16.0);
}

#[test]
fn test_svalbard_late_june_is_polar_day() {
    let report = compute_astronomy(coord(78.0, 15.0), at(2024, 6, 25, 0), 0.0).unwrap();
    assert!(report.sun.is_polar_day);
    assert!(!report.sun.is_polar_night);
    assert!(report.sun.sunrise_local.is_none());
    assert!(report.sun.sunset_local.is_none());
}

#[test]
fn test_leap_day_and_new_year_are_stable() {
    let c = coord(40.0, -75.0);
    let feb28 = compute_astronomy(c, at(2024, 2, 28, 0), 0.0).unwrap().sun;
    let feb29 = compute_astronomy(c, at(2024, 2, 29, 0), 0.0).unwrap().sun;
    let mar01 = compute_astronomy(c, at(2024, 3, 1, 0), 0.0).unwrap().sun;
    assert!(feb29.day_length_hours > feb28.day_length_hours);
    assert!(mar01.day_length_hours > feb29.day_length_hours);
    assert!(mar01.day_length_hours - feb28.day_length_hours < 0.12);

    let dec31 = compute_astronomy(c, at(2023, 12, 31, 0), 0.0).unwrap().sun;
    let jan01 = compute_astronomy(c, at(2024, 1, 1, 0), 0.0).unwrap().sun;
    assert!((jan01.day_length_hours - dec31.day_length_hours).abs() < 0.05);
}

#[test]
fn test_invalid_coordinates_rejected() {
    for (lat, lon) in [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.01), (0.0, -200.0)] {
        assert!(matches!(
            GeoCoordinate::new(lat, lon),
            Err(AstroError::InvalidCoordinate { .. })
        ));
    }
}
