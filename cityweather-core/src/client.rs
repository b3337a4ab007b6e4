use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config::Config, model::CityWeather};

/// Which upstream timeline shape to request.
///
/// The provider serves the same record under two paths with different time
/// formats: `timeline/{city}/today` (12-hour sunrise/sunset) and
/// `timeline/{city}` (24-hour). Both are supported; the daylight parser
/// detects the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastRange {
    Today,
    FullTimeline,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach the weather provider: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Weather provider returned an empty response")]
    EmptyBody,

    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Visual Crossing timeline API.
#[derive(Debug, Clone)]
pub struct VisualCrossingClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl VisualCrossingClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// Convenience wrapper for the common `/today` call shape.
    pub async fn today(&self, city: &str) -> Result<CityWeather, FetchError> {
        self.fetch(city, ForecastRange::Today).await
    }

    /// Fetch the weather record for a city. A single attempt, no retry;
    /// the derived daylight hours are filled in before returning.
    pub async fn fetch(&self, city: &str, range: ForecastRange) -> Result<CityWeather, FetchError> {
        // City names are free text and end up in the URL path.
        let city_segment = urlencoding::encode(city);

        let url = match range {
            ForecastRange::Today => {
                format!("{}/timeline/{}/today", self.base_url, city_segment)
            }
            ForecastRange::FullTimeline => {
                format!("{}/timeline/{}", self.base_url, city_segment)
            }
        };

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("contentType", "json")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        // Contains upstream API data; keep this behind debug.
        tracing::debug!(city, %status, "raw provider response: {body}");

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        let mut record: CityWeather = serde_json::from_str(&body)?;
        record.compute_daylight();

        Ok(record)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Upstream error bodies are arbitrary text; the cut must land on a char
    // boundary or the slice panics.
    let end = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
    format!("{}...", &body[..end])
}
