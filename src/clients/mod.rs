/// External API clients module
use crate::errors::{AstroError, AstroResult};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> AstroResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("sky-almanac/0.1")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Sunrise/sunset web service client
pub struct SunTimesApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl SunTimesApiClient {
    pub fn new(base_url: String, timeout: Duration) -> AstroResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch UTC sunrise/sunset for one place and date. Single attempt.
    pub async fn fetch(&self, latitude: f64, longitude: f64, date: NaiveDate) -> AstroResult<Value> {
        info!(
            url = self.base_url(),
            latitude,
            longitude,
            %date,
            "Requesting remote sun times"
        );
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AstroError::Upstream(format!(
                "sun times request failed with status {}",
                resp.status()
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }
}
