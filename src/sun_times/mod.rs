/// Sunrise/sunset hour-angle solver and providers; providers answer in UTC only
mod remote;

pub use remote::{parse_sun_events, RemoteSunTimes};

use crate::clients::SunTimesApiClient;
use crate::config::EngineConfig;
use crate::domain::{GeoCoordinate, ObservationRequest, SolarEphemeris, SunTimes, SunTimesSource};
use crate::errors::AstroResult;
use crate::utils::hours_to_time;
use std::future::Future;
use tracing::warn;

/// Altitude of the sun's centre at rise/set: refraction plus semidiameter
pub const HORIZON_ALTITUDE_DEG: f64 = -0.833;
pub const DEGREES_PER_HOUR: f64 = 15.0;
const MIN_DENOMINATOR: f64 = 1e-12;

/// Outcome of the hour-angle equation for one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngle {
    /// Half the daylight arc, degrees in [0, 180]
    Degrees(f64),
    PolarDay,
    PolarNight,
}

/// Solve `cos H = (sin h0 - sin(lat) sin(dec)) / (cos(lat) cos(dec))`
pub fn hour_angle(latitude_deg: f64, declination_deg: f64) -> HourAngle {
    let lat = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    let numerator = HORIZON_ALTITUDE_DEG.to_radians().sin() - lat.sin() * dec.sin();
    let denominator = lat.cos() * dec.cos();

    let ratio = if denominator.abs() < MIN_DENOMINATOR {
        numerator.signum() * f64::INFINITY
    } else {
        numerator / denominator
    };

    if ratio < -1.0 {
        // sun stays above the horizon all day
        HourAngle::PolarDay
    } else if ratio > 1.0 {
        HourAngle::PolarNight
    } else {
        HourAngle::Degrees(ratio.acos().to_degrees())
    }
}

/// Rise/set state in UTC
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DaylightState {
    /// Fractional hours after 00:00 UTC of the request date; may fall outside [0, 24)
    Rises { sunrise_utc: f64, sunset_utc: f64 },
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvents {
    pub state: DaylightState,
    pub source: SunTimesSource,
}

/// UTC rise/set from the local hour-angle solver
pub fn solve_utc(coordinate: &GeoCoordinate, ephemeris: &SolarEphemeris) -> DaylightState {
    match hour_angle(coordinate.latitude(), ephemeris.declination_deg) {
        HourAngle::PolarDay => DaylightState::PolarDay,
        HourAngle::PolarNight => DaylightState::PolarNight,
        HourAngle::Degrees(h) => {
            let solar_noon_utc = 12.0
                - coordinate.longitude() / DEGREES_PER_HOUR
                - ephemeris.equation_of_time_min / 60.0;
            let half_day = h / DEGREES_PER_HOUR;
            DaylightState::Rises {
                sunrise_utc: solar_noon_utc - half_day,
                sunset_utc: solar_noon_utc + half_day,
            }
        }
    }
}

/// Shift UTC events to local clock time and wrap into [0, 24)
pub fn localize(events: &SunEvents, utc_offset_hours: f64) -> SunTimes {
    match events.state {
        DaylightState::PolarDay => SunTimes::polar_day(utc_offset_hours, events.source),
        DaylightState::PolarNight => SunTimes::polar_night(utc_offset_hours, events.source),
        DaylightState::Rises {
            sunrise_utc,
            sunset_utc,
        } => SunTimes::with_times(
            hours_to_time(sunrise_utc + utc_offset_hours),
            hours_to_time(sunset_utc + utc_offset_hours),
            sunset_utc - sunrise_utc,
            utc_offset_hours,
            events.source,
        ),
    }
}

/// Anything that can answer "when does the sun rise and set here, in UTC"
pub trait SunTimesProvider: Send + Sync {
    fn sun_events(
        &self,
        request: &ObservationRequest,
        ephemeris: &SolarEphemeris,
    ) -> impl Future<Output = AstroResult<SunEvents>> + Send;
}

/// In-process hour-angle solver
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSunTimes;

impl LocalSunTimes {
    pub fn events(&self, request: &ObservationRequest, ephemeris: &SolarEphemeris) -> SunEvents {
        SunEvents {
            state: solve_utc(request.coordinate(), ephemeris),
            source: SunTimesSource::Local,
        }
    }
}

impl SunTimesProvider for LocalSunTimes {
    fn sun_events(
        &self,
        request: &ObservationRequest,
        ephemeris: &SolarEphemeris,
    ) -> impl Future<Output = AstroResult<SunEvents>> + Send {
        std::future::ready(Ok(self.events(request, ephemeris)))
    }
}

/// Primary provider with a single-shot fallback
#[derive(Debug, Clone)]
pub struct FallbackSunTimes<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSunTimes<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> SunTimesProvider for FallbackSunTimes<P, F>
where
    P: SunTimesProvider,
    F: SunTimesProvider,
{
    fn sun_events(
        &self,
        request: &ObservationRequest,
        ephemeris: &SolarEphemeris,
    ) -> impl Future<Output = AstroResult<SunEvents>> + Send {
        async move {
            match self.primary.sun_events(request, ephemeris).await {
                Ok(events) => Ok(events),
                Err(e) => {
                    warn!(
                        code = e.code(),
                        "Primary sun times provider failed, falling back: {}", e
                    );
                    self.fallback.sun_events(request, ephemeris).await
                }
            }
        }
    }
}

/// Provider chosen by [`EngineConfig`]
pub enum ConfiguredSunTimes {
    Local(LocalSunTimes),
    RemoteWithFallback(FallbackSunTimes<RemoteSunTimes, LocalSunTimes>),
}

impl ConfiguredSunTimes {
    pub fn from_config(config: &EngineConfig) -> AstroResult<Self> {
        if !config.remote.enabled {
            return Ok(Self::Local(LocalSunTimes));
        }
        let client = SunTimesApiClient::new(config.remote.api_url.clone(), config.remote.timeout)?;
        Ok(Self::RemoteWithFallback(FallbackSunTimes::new(
            RemoteSunTimes::new(client),
            LocalSunTimes,
        )))
    }
}

impl SunTimesProvider for ConfiguredSunTimes {
    fn sun_events(
        &self,
        request: &ObservationRequest,
        ephemeris: &SolarEphemeris,
    ) -> impl Future<Output = AstroResult<SunEvents>> + Send {
        async move {
            match self {
                Self::Local(local) => local.sun_events(request, ephemeris).await,
                Self::RemoteWithFallback(chain) => chain.sun_events(request, ephemeris).await,
            }
        }
    }
}
