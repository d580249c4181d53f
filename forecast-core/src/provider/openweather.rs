use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;

use crate::model::OneCallPayload;

use super::{ForecastRequest, ForecastSource};

const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// One Call API client.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherSource {
    async fn fetch(&self, request: &ForecastRequest) -> Result<OneCallPayload> {
        let lat = request.lat.to_string();
        let lon = request.lon.to_string();

        tracing::debug!(%lat, %lon, units = %request.units, "requesting One Call forecast");

        let res = self
            .http
            .get(ONE_CALL_URL)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", request.units.as_str()),
                ("exclude", "minutely,alerts"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (One Call)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather One Call response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather One Call request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let payload: OneCallPayload =
            serde_json::from_str(&body).context("Failed to parse OpenWeather One Call JSON")?;

        tracing::debug!(
            hours = payload.hourly.len(),
            days = payload.daily.len(),
            "received One Call forecast"
        );

        Ok(payload)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("bad key"), "bad key");
    }

    #[test]
    fn long_bodies_are_cut_on_a_char_boundary() {
        let body = "°".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
