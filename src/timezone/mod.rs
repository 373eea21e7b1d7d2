/// UTC offset policies, standard time only
use crate::domain::GeoCoordinate;
use crate::errors::{AstroError, AstroResult};
use chrono::NaiveDate;
use std::sync::Arc;

pub trait TimezoneOffsetPolicy: Send + Sync {
    /// Offset from UTC in hours for a place on a date
    fn utc_offset_hours(&self, coordinate: &GeoCoordinate, date: NaiveDate) -> f64;
}

/// Western edges of the contiguous-US standard time bands, east to west.
/// Each band is half-open: `[west_edge, previous west_edge)`.
pub const US_EASTERN_WEST_EDGE: f64 = -87.5;
pub const US_CENTRAL_WEST_EDGE: f64 = -102.5;
pub const US_MOUNTAIN_WEST_EDGE: f64 = -115.0;

pub const US_EASTERN_OFFSET: f64 = -5.0;
pub const US_CENTRAL_OFFSET: f64 = -6.0;
pub const US_MOUNTAIN_OFFSET: f64 = -7.0;
pub const US_PACIFIC_OFFSET: f64 = -8.0;

/// Longitude-band approximation of US standard time zones
#[derive(Debug, Clone, Copy, Default)]
pub struct UsLongitudeBands;

impl TimezoneOffsetPolicy for UsLongitudeBands {
    fn utc_offset_hours(&self, coordinate: &GeoCoordinate, _date: NaiveDate) -> f64 {
        let lon = coordinate.longitude();
        if lon >= US_EASTERN_WEST_EDGE {
            US_EASTERN_OFFSET
        } else if lon >= US_CENTRAL_WEST_EDGE {
            US_CENTRAL_OFFSET
        } else if lon >= US_MOUNTAIN_WEST_EDGE {
            US_MOUNTAIN_OFFSET
        } else {
            US_PACIFIC_OFFSET
        }
    }
}

pub const NAUTICAL_ZONE_WIDTH_DEG: f64 = 15.0;
pub const NAUTICAL_MAX_ZONE: f64 = 12.0;

/// 15-degree nautical zones centred on multiples of 15 degrees, `[c - 7.5, c + 7.5)`
#[derive(Debug, Clone, Copy, Default)]
pub struct NauticalZones;

impl TimezoneOffsetPolicy for NauticalZones {
    fn utc_offset_hours(&self, coordinate: &GeoCoordinate, _date: NaiveDate) -> f64 {
        let zone = ((coordinate.longitude() + NAUTICAL_ZONE_WIDTH_DEG / 2.0)
            / NAUTICAL_ZONE_WIDTH_DEG)
            .floor();
        zone.clamp(-NAUTICAL_MAX_ZONE, NAUTICAL_MAX_ZONE)
    }
}

/// Same offset everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOffset {
    hours: f64,
}

impl FixedOffset {
    pub const MAX_HOURS: f64 = 14.0;

    pub fn new(hours: f64) -> AstroResult<Self> {
        if !hours.is_finite() || hours.abs() > Self::MAX_HOURS {
            return Err(AstroError::Config(format!(
                "UTC offset {} out of range",
                hours
            )));
        }
        Ok(Self { hours })
    }

    pub fn utc() -> Self {
        Self { hours: 0.0 }
    }
}

impl TimezoneOffsetPolicy for FixedOffset {
    fn utc_offset_hours(&self, _coordinate: &GeoCoordinate, _date: NaiveDate) -> f64 {
        self.hours
    }
}

/// Policy selector as written in configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimezonePolicyKind {
    UsBands,
    Nautical,
    Fixed(FixedOffset),
}

impl TimezonePolicyKind {
    /// Accepts `us-bands`, `nautical`, `utc`, or a numeric offset in hours
    pub fn parse(value: &str) -> AstroResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "us-bands" | "us" => Ok(Self::UsBands),
            "nautical" => Ok(Self::Nautical),
            "utc" => Ok(Self::Fixed(FixedOffset::utc())),
            other => other
                .parse::<f64>()
                .map_err(|_| AstroError::Config(format!("unknown timezone policy '{}'", value)))
                .and_then(FixedOffset::new)
                .map(Self::Fixed),
        }
    }

    pub fn into_policy(self) -> Arc<dyn TimezoneOffsetPolicy> {
        match self {
            Self::UsBands => Arc::new(UsLongitudeBands),
            Self::Nautical => Arc::new(NauticalZones),
            Self::Fixed(offset) => Arc::new(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(policy: &dyn TimezoneOffsetPolicy, lon: f64) -> f64 {
        let coord = GeoCoordinate::new(40.0, lon).unwrap();
        policy.utc_offset_hours(&coord, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
    }

    #[test]
    fn test_us_bands_typical_cities() {
        assert_eq!(offset(&UsLongitudeBands, -74.0), US_EASTERN_OFFSET); // New York
        assert_eq!(offset(&UsLongitudeBands, -90.2), US_CENTRAL_OFFSET); // St. Louis
        assert_eq!(offset(&UsLongitudeBands, -110.5885), US_MOUNTAIN_OFFSET); // Yellowstone
        assert_eq!(offset(&UsLongitudeBands, -122.4), US_PACIFIC_OFFSET); // San Francisco
    }

    #[test]
    fn test_us_band_edges_belong_to_eastern_side() {
        assert_eq!(offset(&UsLongitudeBands, -87.5), US_EASTERN_OFFSET);
        assert_eq!(offset(&UsLongitudeBands, -87.500001), US_CENTRAL_OFFSET);
        assert_eq!(offset(&UsLongitudeBands, -102.5), US_CENTRAL_OFFSET);
        assert_eq!(offset(&UsLongitudeBands, -115.0), US_MOUNTAIN_OFFSET);
        assert_eq!(offset(&UsLongitudeBands, -180.0), US_PACIFIC_OFFSET);
    }

    #[test]
    fn test_nautical_zone_edges() {
        assert_eq!(offset(&NauticalZones, 0.0), 0.0);
        assert_eq!(offset(&NauticalZones, 7.5), 1.0);
        assert_eq!(offset(&NauticalZones, -7.5), 0.0);
        assert_eq!(offset(&NauticalZones, 15.0), 1.0);
        assert_eq!(offset(&NauticalZones, 180.0), 12.0);
        assert_eq!(offset(&NauticalZones, -180.0), -12.0);
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!(TimezonePolicyKind::parse("us-bands").unwrap(), TimezonePolicyKind::UsBands);
        assert_eq!(TimezonePolicyKind::parse("Nautical").unwrap(), TimezonePolicyKind::Nautical);
        assert_eq!(
            TimezonePolicyKind::parse("utc").unwrap(),
            TimezonePolicyKind::Fixed(FixedOffset::utc())
        );
        assert_eq!(
            TimezonePolicyKind::parse("-3.5").unwrap(),
            TimezonePolicyKind::Fixed(FixedOffset::new(-3.5).unwrap())
        );
        assert!(TimezonePolicyKind::parse("mars").is_err());
        assert!(TimezonePolicyKind::parse("20").is_err());
    }

    #[test]
    fn test_fixed_policy_ignores_location() {
        let policy = TimezonePolicyKind::parse("5.5").unwrap().into_policy();
        assert_eq!(offset(policy.as_ref(), -120.0), 5.5);
        assert_eq!(offset(policy.as_ref(), 100.0), 5.5);
    }
}
