/// Engine configuration module
use crate::errors::{AstroError, AstroResult};
use crate::timezone::TimezonePolicyKind;
use std::env;
use std::time::Duration;

pub const DEFAULT_SUN_TIMES_API_URL: &str = "https://api.sunrise-sunset.org/json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_CACHE_PRECISION_DECIMALS: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub remote: RemoteSunTimesConfig,
    pub timezone: TimezonePolicyKind,
    pub cache_precision_decimals: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RemoteSunTimesConfig {
    pub enabled: bool,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            remote: RemoteSunTimesConfig {
                enabled: false,
                api_url: DEFAULT_SUN_TIMES_API_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            },
            timezone: TimezonePolicyKind::UsBands,
            cache_precision_decimals: DEFAULT_CACHE_PRECISION_DECIMALS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AstroResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> AstroResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match lookup("SUN_TIMES_REMOTE_ENABLED") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AstroError::Config(format!("SUN_TIMES_REMOTE_ENABLED: '{}' is not a boolean", v))
            })?,
            None => false,
        };

        let api_url = lookup("SUN_TIMES_API_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUN_TIMES_API_URL.to_string());

        let timeout_seconds = env_u64(&lookup, "SUN_TIMES_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS);
        if timeout_seconds == 0 {
            return Err(AstroError::Config(
                "SUN_TIMES_TIMEOUT_SECONDS must be positive".to_string(),
            ));
        }

        let timezone = match lookup("TIMEZONE_POLICY") {
            Some(v) => TimezonePolicyKind::parse(&v)?,
            None => TimezonePolicyKind::UsBands,
        };

        let cache_precision_decimals = env_u64(
            &lookup,
            "CACHE_PRECISION_DECIMALS",
            DEFAULT_CACHE_PRECISION_DECIMALS as u64,
        )
        .min(6) as u32;

        Ok(Self {
            remote: RemoteSunTimesConfig {
                enabled,
                api_url,
                timeout: Duration::from_secs(timeout_seconds),
            },
            timezone,
            cache_precision_decimals,
        })
    }
}

fn env_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
