/// Sky-viewing heuristics; thresholds are tunable hints, not physics
use crate::domain::{AuroraProbability, MilkyWayVisibility, SkyConditions};
use std::ops::RangeInclusive;

/// Moon illumination ceilings (percent) for each Milky Way tier
pub const EXCELLENT_MAX_ILLUMINATION: f64 = 10.0;
pub const GOOD_MAX_ILLUMINATION: f64 = 30.0;
pub const FAIR_MAX_ILLUMINATION: f64 = 60.0;

/// Months when the galactic core is well placed after dark
pub const NORTHERN_CORE_SEASON: RangeInclusive<u32> = 4..=9;
pub const SOUTHERN_CORE_SEASON: RangeInclusive<u32> = 2..=10;

/// Absolute-latitude floors for each aurora tier
pub const HIGH_AURORA_MIN_LATITUDE: f64 = 60.0;
pub const MODERATE_AURORA_MIN_LATITUDE: f64 = 50.0;
pub const LOW_AURORA_MIN_LATITUDE: f64 = 40.0;

/// Dark-sky half of the year, equinox to equinox
pub const NORTHERN_AURORA_MONTHS: [u32; 7] = [9, 10, 11, 12, 1, 2, 3];
pub const SOUTHERN_AURORA_MONTHS: RangeInclusive<u32> = 3..=9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// The equator counts as northern
    pub fn of(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}

pub fn in_core_season(month: u32, hemisphere: Hemisphere) -> bool {
    match hemisphere {
        Hemisphere::Northern => NORTHERN_CORE_SEASON.contains(&month),
        Hemisphere::Southern => SOUTHERN_CORE_SEASON.contains(&month),
    }
}

pub fn in_aurora_season(month: u32, hemisphere: Hemisphere) -> bool {
    match hemisphere {
        Hemisphere::Northern => NORTHERN_AURORA_MONTHS.contains(&month),
        Hemisphere::Southern => SOUTHERN_AURORA_MONTHS.contains(&month),
    }
}

pub fn milky_way_visibility(
    illumination_percent: f64,
    month: u32,
    latitude: f64,
) -> MilkyWayVisibility {
    let in_season = in_core_season(month, Hemisphere::of(latitude));
    if in_season && illumination_percent <= EXCELLENT_MAX_ILLUMINATION {
        MilkyWayVisibility::Excellent
    } else if (in_season && illumination_percent <= GOOD_MAX_ILLUMINATION)
        || illumination_percent <= EXCELLENT_MAX_ILLUMINATION
    {
        MilkyWayVisibility::Good
    } else if illumination_percent <= FAIR_MAX_ILLUMINATION {
        MilkyWayVisibility::Fair
    } else {
        MilkyWayVisibility::Poor
    }
}

/// Latitude sets the tier; outside the local dark season it drops one step
pub fn aurora_probability(month: u32, latitude: f64) -> AuroraProbability {
    let abs_lat = latitude.abs();
    let tier = if abs_lat >= HIGH_AURORA_MIN_LATITUDE {
        AuroraProbability::High
    } else if abs_lat >= MODERATE_AURORA_MIN_LATITUDE {
        AuroraProbability::Moderate
    } else if abs_lat >= LOW_AURORA_MIN_LATITUDE {
        AuroraProbability::Low
    } else {
        AuroraProbability::VeryLow
    };

    if in_aurora_season(month, Hemisphere::of(latitude)) {
        tier
    } else {
        tier.downgrade()
    }
}

pub fn sky_conditions(illumination_percent: f64, month: u32, latitude: f64) -> SkyConditions {
    SkyConditions {
        milky_way_visibility: milky_way_visibility(illumination_percent, month, latitude),
        aurora_probability: aurora_probability(month, latitude),
    }
}
