/// Unified error handling module
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AstroError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid elevation: {0} m")]
    InvalidElevation(f64),

    #[error("External API error: {0}")]
    ExternalApi(#[from] reqwest::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AstroError {
    /// Short machine-readable code, mirrors the upstream status buckets.
    pub fn code(&self) -> &'static str {
        match self {
            AstroError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            AstroError::InvalidElevation(_) => "INVALID_ELEVATION",
            AstroError::ExternalApi(e) => {
                if e.is_timeout() {
                    return "UPSTREAM_TIMEOUT";
                }
                match e.status().map(|s| s.as_u16()) {
                    Some(403) => "UPSTREAM_403",
                    Some(404) => "UPSTREAM_404",
                    Some(429) => "UPSTREAM_429",
                    Some(500..=599) => "UPSTREAM_5XX",
                    _ => "UPSTREAM_ERROR",
                }
            }
            AstroError::Upstream(_) => "UPSTREAM_ERROR",
            AstroError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Type alias for engine results
pub type AstroResult<T> = Result<T, AstroError>;
