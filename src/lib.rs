//! Sunrise/sunset, moon phase and sky-viewing conditions for a place and date.
//!
//! The core is [`compute_astronomy`], a pure function. [`AstronomyService`]
//! adds optional delegation of sunrise/sunset to a remote service with a
//! local fallback.
pub mod cache;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lunar;
pub mod services;
pub mod sky;
pub mod solar;
pub mod sun_times;
pub mod time;
pub mod timezone;
pub mod utils;

pub use crate::cache::ReportCache;
pub use crate::config::EngineConfig;
pub use crate::domain::{
    AstronomicalReport, AuroraProbability, GeoCoordinate, MilkyWayVisibility, MoonPhase,
    ObservationRequest, PhaseName, SkyConditions, SolarEphemeris, SunTimes, SunTimesSource,
};
pub use crate::errors::{AstroError, AstroResult};
pub use crate::services::{compute_astronomy, Almanac, AstronomyService};
pub use crate::sun_times::{FallbackSunTimes, LocalSunTimes, RemoteSunTimes, SunTimesProvider};
pub use crate::time::{Clock, FixedClock, SystemClock};
pub use crate::timezone::TimezoneOffsetPolicy;
