/// Report aggregation layer
use crate::cache::ReportCache;
use crate::config::EngineConfig;
use crate::domain::{AstronomicalReport, GeoCoordinate, ObservationRequest, SolarEphemeris};
use crate::errors::AstroResult;
use crate::lunar::moon_phase;
use crate::sky::sky_conditions;
use crate::solar::solar_ephemeris;
use crate::sun_times::{localize, ConfiguredSunTimes, LocalSunTimes, SunEvents, SunTimesProvider};
use crate::time::julian_day_for_date;
use crate::timezone::{TimezoneOffsetPolicy, UsLongitudeBands};
use chrono::{Datelike, NaiveDateTime};
use std::sync::Arc;
use tracing::debug;

/// Pure, synchronous report builder. Holds only the timezone policy.
#[derive(Clone)]
pub struct Almanac {
    timezone: Arc<dyn TimezoneOffsetPolicy>,
}

impl Default for Almanac {
    fn default() -> Self {
        Self::new(Arc::new(UsLongitudeBands))
    }
}

impl Almanac {
    pub fn new(timezone: Arc<dyn TimezoneOffsetPolicy>) -> Self {
        Self { timezone }
    }

    /// Solar position at 12:00 UTC of the request's calendar date
    pub fn solar_ephemeris_for(&self, request: &ObservationRequest) -> SolarEphemeris {
        solar_ephemeris(julian_day_for_date(request.calendar_date()) + 0.5)
    }

    /// Full report using the local sunrise/sunset solver
    pub fn compute(&self, request: &ObservationRequest) -> AstronomicalReport {
        let ephemeris = self.solar_ephemeris_for(request);
        let events = LocalSunTimes.events(request, &ephemeris);
        self.assemble(request, ephemeris, &events)
    }

    /// Combine sun events from any provider with the moon and sky figures
    pub fn assemble(
        &self,
        request: &ObservationRequest,
        ephemeris: SolarEphemeris,
        events: &SunEvents,
    ) -> AstronomicalReport {
        let coordinate = *request.coordinate();
        let date = request.calendar_date();
        let offset = self.timezone.utc_offset_hours(&coordinate, date);

        let moon = moon_phase(&request.date());
        let sky = sky_conditions(moon.illumination_percent, date.month(), coordinate.latitude());

        AstronomicalReport {
            coordinate,
            date,
            elevation_m: request.elevation_m(),
            sun: localize(events, offset),
            moon,
            sky,
            solar: ephemeris,
        }
    }
}

/// One-shot report using the local solver and the contiguous-US standard-time bands.
///
/// Local clock times are only right for contiguous-US longitudes; elsewhere build
/// `Almanac::new(Arc::new(NauticalZones))` or `Almanac::new(Arc::new(FixedOffset::new(h)?))`.
pub fn compute_astronomy(
    coordinate: GeoCoordinate,
    date: NaiveDateTime,
    elevation_m: f64,
) -> AstroResult<AstronomicalReport> {
    let request = ObservationRequest::new(coordinate, date, elevation_m)?;
    Ok(Almanac::default().compute(&request))
}

/// Async report service that asks a [`SunTimesProvider`] for sunrise/sunset
pub struct AstronomyService<P> {
    almanac: Almanac,
    provider: P,
}

impl AstronomyService<ConfiguredSunTimes> {
    pub fn from_config(config: &EngineConfig) -> AstroResult<Self> {
        Ok(Self::new(
            Almanac::new(config.timezone.into_policy()),
            ConfiguredSunTimes::from_config(config)?,
        ))
    }
}

impl<P: SunTimesProvider> AstronomyService<P> {
    pub fn new(almanac: Almanac, provider: P) -> Self {
        Self { almanac, provider }
    }

    pub fn almanac(&self) -> &Almanac {
        &self.almanac
    }

    /// Build a report; provider errors propagate unless the provider has its own fallback
    pub async fn report(&self, request: &ObservationRequest) -> AstroResult<AstronomicalReport> {
        let ephemeris = self.almanac.solar_ephemeris_for(request);
        let events = self.provider.sun_events(request, &ephemeris).await?;
        Ok(self.almanac.assemble(request, ephemeris, &events))
    }

    /// Same as [`report`](Self::report), memoized in a caller-owned cache
    pub async fn report_cached(
        &self,
        cache: &mut ReportCache,
        request: &ObservationRequest,
    ) -> AstroResult<AstronomicalReport> {
        if let Some(report) = cache.get(request) {
            debug!(key = ?cache.key_for(request), "Report cache hit");
            return Ok(report.clone());
        }
        let report = self.report(request).await?;
        cache.insert(request, report.clone());
        Ok(report)
    }
}
