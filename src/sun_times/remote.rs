/// Remote sunrise/sunset provider
use super::{DaylightState, SunEvents, SunTimesProvider};
use crate::clients::SunTimesApiClient;
use crate::domain::{ObservationRequest, SolarEphemeris, SunTimesSource};
use crate::errors::{AstroError, AstroResult};
use crate::utils::{b_pick, s_pick, t_pick};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Year the sunrise-sunset.org API uses for "no event" placeholders
const PLACEHOLDER_YEAR: i32 = 1970;

pub struct RemoteSunTimes {
    client: SunTimesApiClient,
}

impl RemoteSunTimes {
    pub fn new(client: SunTimesApiClient) -> Self {
        Self { client }
    }
}

impl SunTimesProvider for RemoteSunTimes {
    fn sun_events(
        &self,
        request: &ObservationRequest,
        _ephemeris: &SolarEphemeris,
    ) -> impl Future<Output = AstroResult<SunEvents>> + Send {
        async move {
            let coordinate = request.coordinate();
            let date = request.calendar_date();
            let payload = self
                .client
                .fetch(coordinate.latitude(), coordinate.longitude(), date)
                .await?;
            let events = parse_sun_events(&payload, date)?;
            debug!(?events, "Remote sun times parsed");
            Ok(events)
        }
    }
}

/// Parse a sunrise-sunset.org style payload.
///
/// Accepts `{"status": "OK", "results": {"sunrise": ..., "sunset": ...}}` with
/// optional `polar_day` / `polar_night` booleans. Placeholder timestamps without
/// an explicit polar flag are rejected so the caller falls back.
pub fn parse_sun_events(payload: &Value, date: NaiveDate) -> AstroResult<SunEvents> {
    if let Some(status) = s_pick(payload, &["status"]) {
        if status != "OK" {
            return Err(AstroError::Upstream(format!("status {}", status)));
        }
    }

    let results = payload.get("results").unwrap_or(payload);
    let polar_day = b_pick(results, &["polar_day", "is_polar_day", "isPolarDay"]);
    let polar_night = b_pick(results, &["polar_night", "is_polar_night", "isPolarNight"]);

    let state = match (polar_day, polar_night) {
        (Some(true), Some(true)) => {
            return Err(AstroError::Upstream(
                "both polar day and polar night reported".to_string(),
            ))
        }
        (Some(true), _) => DaylightState::PolarDay,
        (_, Some(true)) => DaylightState::PolarNight,
        _ => {
            let sunrise = t_pick(results, &["sunrise"])
                .ok_or_else(|| AstroError::Upstream("missing sunrise".to_string()))?;
            let sunset = t_pick(results, &["sunset"])
                .ok_or_else(|| AstroError::Upstream("missing sunset".to_string()))?;

            if date.year() != PLACEHOLDER_YEAR && sunrise.year() == PLACEHOLDER_YEAR {
                return Err(AstroError::Upstream(
                    "placeholder timestamps without polar flags".to_string(),
                ));
            }
            if sunset <= sunrise {
                return Err(AstroError::Upstream(format!(
                    "sunset {} not after sunrise {}",
                    sunset, sunrise
                )));
            }

            let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
            let hours_since_midnight =
                |t: chrono::DateTime<Utc>| (t - midnight).num_seconds() as f64 / 3600.0;
            DaylightState::Rises {
                sunrise_utc: hours_since_midnight(sunrise),
                sunset_utc: hours_since_midnight(sunset),
            }
        }
    };

    Ok(SunEvents {
        state,
        source: SunTimesSource::Remote,
    })
}
