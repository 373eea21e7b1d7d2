/// Domain models for the engine
use crate::errors::{AstroError, AstroResult};
use crate::time::Clock;
use crate::utils::serialize_clock_12h;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Validated geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    pub const MAX_LATITUDE: f64 = 90.0;
    pub const MAX_LONGITUDE: f64 = 180.0;

    /// Rejects non-finite values and anything outside [-90,90] x [-180,180]
    pub fn new(latitude: f64, longitude: f64) -> AstroResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && latitude.abs() <= Self::MAX_LATITUDE
            && longitude.abs() <= Self::MAX_LONGITUDE;
        if !valid {
            return Err(AstroError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// One engine invocation: where, when, and how high
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationRequest {
    coordinate: GeoCoordinate,
    date: NaiveDateTime,
    elevation_m: f64,
}

impl ObservationRequest {
    /// `date` is interpreted as UTC
    pub fn new(
        coordinate: GeoCoordinate,
        date: NaiveDateTime,
        elevation_m: f64,
    ) -> AstroResult<Self> {
        if !elevation_m.is_finite() || elevation_m < 0.0 {
            return Err(AstroError::InvalidElevation(elevation_m));
        }
        Ok(Self {
            coordinate,
            date,
            elevation_m,
        })
    }

    /// Request for 00:00 UTC of a calendar date
    pub fn on_date(
        coordinate: GeoCoordinate,
        date: NaiveDate,
        elevation_m: f64,
    ) -> AstroResult<Self> {
        Self::new(coordinate, date.and_time(NaiveTime::MIN), elevation_m)
    }

    /// Request for the clock's current instant
    pub fn now(
        coordinate: GeoCoordinate,
        elevation_m: f64,
        clock: &impl Clock,
    ) -> AstroResult<Self> {
        Self::new(coordinate, clock.now(), elevation_m)
    }

    pub fn coordinate(&self) -> &GeoCoordinate {
        &self.coordinate
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }
}

/// Sun's equatorial position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarEphemeris {
    pub declination_deg: f64,
    pub right_ascension_deg: f64,
    /// Apparent minus mean solar time, in minutes
    pub equation_of_time_min: f64,
}

/// Which provider produced the sunrise/sunset figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SunTimesSource {
    Local,
    Remote,
}

/// Local sunrise/sunset. Either both times are set, or exactly one polar flag is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunTimes {
    #[serde(serialize_with = "serialize_clock_12h")]
    pub sunrise_local: Option<NaiveTime>,
    #[serde(serialize_with = "serialize_clock_12h")]
    pub sunset_local: Option<NaiveTime>,
    pub day_length_hours: f64,
    pub is_polar_day: bool,
    pub is_polar_night: bool,
    pub utc_offset_hours: f64,
    pub source: SunTimesSource,
}

impl SunTimes {
    pub fn with_times(
        sunrise_local: NaiveTime,
        sunset_local: NaiveTime,
        day_length_hours: f64,
        utc_offset_hours: f64,
        source: SunTimesSource,
    ) -> Self {
        Self {
            sunrise_local: Some(sunrise_local),
            sunset_local: Some(sunset_local),
            day_length_hours,
            is_polar_day: false,
            is_polar_night: false,
            utc_offset_hours,
            source,
        }
    }

    pub fn polar_day(utc_offset_hours: f64, source: SunTimesSource) -> Self {
        Self {
            sunrise_local: None,
            sunset_local: None,
            day_length_hours: 24.0,
            is_polar_day: true,
            is_polar_night: false,
            utc_offset_hours,
            source,
        }
    }

    pub fn polar_night(utc_offset_hours: f64, source: SunTimesSource) -> Self {
        Self {
            sunrise_local: None,
            sunset_local: None,
            day_length_hours: 0.0,
            is_polar_day: false,
            is_polar_night: true,
            utc_offset_hours,
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonPhase {
    pub phase_name: PhaseName,
    pub illumination_percent: f64,
    pub age_days: f64,
    pub next_new_moon: NaiveDateTime,
    pub next_full_moon: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MilkyWayVisibility {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AuroraProbability {
    VeryLow,
    Low,
    Moderate,
    High,
}

impl AuroraProbability {
    /// One tier lower, saturating at `VeryLow`
    pub fn downgrade(self) -> Self {
        match self {
            AuroraProbability::High => AuroraProbability::Moderate,
            AuroraProbability::Moderate => AuroraProbability::Low,
            AuroraProbability::Low | AuroraProbability::VeryLow => AuroraProbability::VeryLow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkyConditions {
    pub milky_way_visibility: MilkyWayVisibility,
    pub aurora_probability: AuroraProbability,
}

/// Everything the engine knows about one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstronomicalReport {
    pub coordinate: GeoCoordinate,
    pub date: NaiveDate,
    pub elevation_m: f64,
    pub sun: SunTimes,
    pub moon: MoonPhase,
    pub sky: SkyConditions,
    pub solar: SolarEphemeris,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;

    #[test]
    fn test_coordinate_bounds_inclusive() {
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
        assert!(GeoCoordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert!(matches!(
            GeoCoordinate::new(90.0001, 0.0),
            Err(AstroError::InvalidCoordinate { .. })
        ));
        assert!(GeoCoordinate::new(0.0, -180.5).is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_request_rejects_negative_elevation() {
        let coord = GeoCoordinate::new(10.0, 10.0).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            ObservationRequest::on_date(coord, date, -1.0),
            Err(AstroError::InvalidElevation(_))
        ));
        assert!(ObservationRequest::on_date(coord, date, 0.0).is_ok());
    }

    #[test]
    fn test_request_now_uses_clock() {
        let coord = GeoCoordinate::new(10.0, 10.0).unwrap();
        let instant = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let request = ObservationRequest::now(coord, 100.0, &FixedClock(instant)).unwrap();
        assert_eq!(request.date(), instant);
        assert_eq!(request.elevation_m(), 100.0);
    }

    #[test]
    fn test_polar_constructors_hold_invariant() {
        let day = SunTimes::polar_day(0.0, SunTimesSource::Local);
        assert!(day.is_polar_day && !day.is_polar_night);
        assert!(day.sunrise_local.is_none() && day.sunset_local.is_none());

        let night = SunTimes::polar_night(0.0, SunTimesSource::Local);
        assert!(night.is_polar_night && !night.is_polar_day);
        assert_eq!(night.day_length_hours, 0.0);
    }

    #[test]
    fn test_aurora_downgrade_saturates() {
        assert_eq!(
            AuroraProbability::High.downgrade(),
            AuroraProbability::Moderate
        );
        assert_eq!(
            AuroraProbability::VeryLow.downgrade(),
            AuroraProbability::VeryLow
        );
    }

    #[test]
    fn test_phase_name_serializes_as_label() {
        let json = serde_json::to_string(&PhaseName::WaxingGibbous).unwrap();
        assert_eq!(json, "\"Waxing Gibbous\"");
        let json = serde_json::to_string(&PhaseName::LastQuarter).unwrap();
        assert_eq!(json, "\"Last Quarter\"");
    }
}
