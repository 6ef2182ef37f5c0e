use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::{
    config::Endpoints,
    error::DashboardError,
    model::{Degradation, Location, UNKNOWN_PLACE_NAME, WeatherSnapshot},
    normalize::build_snapshot,
    provider::schema::{
        AirQualityResponse, AirQualitySeries, Forecast, ForecastResponse, GeocodingResponse,
        GeocodingResult,
    },
};

use super::WeatherProvider;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,\
precipitation,rain,showers,snowfall,weather_code,cloud_cover,pressure_msl,surface_pressure,\
wind_speed_10m,wind_direction_10m,wind_gusts_10m,uv_index";
const HOURLY_FIELDS: &str =
    "temperature_2m,precipitation_probability,weather_code,visibility,snowfall,uv_index";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset,\
precipitation_sum,precipitation_probability_max,snowfall_sum,uv_index_max";
const AIR_QUALITY_FIELDS: &str = "pm2_5,european_aqi";

#[derive(Debug, Error)]
enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Open-Meteo geocoding, forecast and air-quality APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    endpoints: Endpoints,
    language: String,
}

impl OpenMeteoProvider {
    pub fn new(
        endpoints: Endpoints,
        language: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skyboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoints,
            language: language.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, RequestError> {
        tracing::debug!(url, "GET");

        let res = self.http.get(url).query(query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn geocode(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<Option<GeocodingResult>, RequestError> {
        query.extend([
            ("count", "1".to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ]);
        let url = join(&self.endpoints.geocoding, path);
        let parsed: GeocodingResponse = self.get_json(&url, &query).await?;
        Ok(parsed.into_first())
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<Forecast, DashboardError> {
        let url = join(&self.endpoints.forecast, "/v1/forecast");
        let query = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let parsed: ForecastResponse = self.get_json(&url, &query).await.map_err(|err| {
            tracing::error!("Forecast request failed: {}", err);
            DashboardError::Unavailable(err.to_string())
        })?;

        parsed.validate().map_err(|err| {
            tracing::error!("Forecast payload rejected: {}", err);
            DashboardError::Unavailable(err.to_string())
        })
    }

    /// Best effort: any failure is logged and yields `None`.
    async fn fetch_air_quality(&self, location: &Location) -> Option<AirQualitySeries> {
        let url = join(&self.endpoints.air_quality, "/v1/air-quality");
        let query = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("hourly", AIR_QUALITY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let parsed: AirQualityResponse = match self.get_json(&url, &query).await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("Air quality fetch failed: {}", err);
                return None;
            }
        };

        match parsed.validate() {
            Ok(series) => Some(series),
            Err(err) => {
                tracing::warn!("Air quality payload rejected: {}", err);
                None
            }
        }
    }

    /// Fill in a name for coordinate-based entry, falling back to a placeholder.
    async fn complete_location(
        &self,
        location: &Location,
        degradations: &mut Vec<Degradation>,
    ) -> Location {
        if location.has_name() {
            return location.clone();
        }

        let resolved = self
            .resolve_by_coordinates(location.latitude, location.longitude)
            .await;
        if resolved.has_name() {
            return resolved;
        }

        degradations.push(Degradation::ReverseGeocoding);
        Location {
            name: UNKNOWN_PLACE_NAME.to_string(),
            country: String::new(),
            ..resolved
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn resolve_by_name(&self, query: &str) -> Result<Location, DashboardError> {
        let found = self
            .geocode("/v1/search", vec![("name", query.to_string())])
            .await
            .unwrap_or_else(|err| {
                tracing::warn!("Geocoding '{}' failed: {}", query, err);
                None
            });

        let result = found.ok_or_else(|| DashboardError::NotFound(query.to_string()))?;
        tracing::info!("Resolved '{}' to {} ({}, {})", query, result.name, result.latitude, result.longitude);

        Ok(Location {
            name: result.name,
            country: result.country.unwrap_or_default(),
            latitude: result.latitude,
            longitude: result.longitude,
        })
    }

    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Location {
        let query = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ];

        match self.geocode("/v1/reverse", query).await {
            Ok(Some(result)) => {
                tracing::info!("Reverse geocoded to: {}", result.name);
                Location {
                    name: result.name,
                    country: result.country.unwrap_or_default(),
                    latitude,
                    longitude,
                }
            }
            Ok(None) => {
                tracing::debug!("Reverse geocoding found no place near {}, {}", latitude, longitude);
                Location::from_coordinates(latitude, longitude)
            }
            Err(err) => {
                tracing::warn!("Reverse geocoding failed: {}", err);
                Location::from_coordinates(latitude, longitude)
            }
        }
    }

    async fn fetch_snapshot(&self, location: &Location) -> Result<WeatherSnapshot, DashboardError> {
        let forecast = self.fetch_forecast(location).await?;

        let mut degradations = Vec::new();
        let air_quality = self.fetch_air_quality(location).await;
        if air_quality.is_none() {
            degradations.push(Degradation::AirQuality);
        }

        let location = self.complete_location(location, &mut degradations).await;

        Ok(build_snapshot(
            location,
            &forecast,
            air_quality.as_ref(),
            Utc::now(),
            degradations,
        ))
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_trailing_slash() {
        assert_eq!(join("http://localhost:1234/", "/v1/search"), "http://localhost:1234/v1/search");
        assert_eq!(join("http://localhost:1234", "/v1/search"), "http://localhost:1234/v1/search");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ü".repeat(250);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
