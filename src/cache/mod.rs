/// Caller-owned report cache
use crate::config::{EngineConfig, DEFAULT_CACHE_PRECISION_DECIMALS};
use crate::domain::{AstronomicalReport, ObservationRequest};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Coordinate scaled to a fixed number of decimals plus the calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub latitude_scaled: i64,
    pub longitude_scaled: i64,
    pub date: NaiveDate,
}

impl CacheKey {
    pub fn new(request: &ObservationRequest, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        let coordinate = request.coordinate();
        Self {
            latitude_scaled: (coordinate.latitude() * scale).round() as i64,
            longitude_scaled: (coordinate.longitude() * scale).round() as i64,
            date: request.calendar_date(),
        }
    }
}

/// Memoizes reports per (rounded coordinate, date). Not shared, not global.
#[derive(Debug)]
pub struct ReportCache {
    decimals: u32,
    entries: HashMap<CacheKey, AstronomicalReport>,
}

impl ReportCache {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals,
            entries: HashMap::new(),
        }
    }

    /// Rounds keys to `cache_precision_decimals`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.cache_precision_decimals)
    }

    pub fn key_for(&self, request: &ObservationRequest) -> CacheKey {
        CacheKey::new(request, self.decimals)
    }

    pub fn get(&self, request: &ObservationRequest) -> Option<&AstronomicalReport> {
        self.entries.get(&self.key_for(request))
    }

    pub fn insert(&mut self, request: &ObservationRequest, report: AstronomicalReport) {
        let key = self.key_for(request);
        self.entries.insert(key, report);
    }

    /// Cached report, or compute and store one. Errors are not cached.
    pub fn get_or_try_insert_with<E, F>(
        &mut self,
        request: &ObservationRequest,
        compute: F,
    ) -> Result<&AstronomicalReport, E>
    where
        F: FnOnce(&ObservationRequest) -> Result<AstronomicalReport, E>,
    {
        let key = self.key_for(request);
        if !self.entries.contains_key(&key) {
            let report = compute(request)?;
            self.entries.insert(key, report);
        }
        Ok(&self.entries[&key])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PRECISION_DECIMALS)
    }
}
