use crate::{
    Config, DashboardError, Location, WeatherSnapshot, provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;
pub mod schema;

/// Source of locations and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Forward geocoding. Zero results or any transport failure is `NotFound`.
    async fn resolve_by_name(&self, query: &str) -> Result<Location, DashboardError>;

    /// Reverse geocoding. Never fails; name and country stay empty when nothing is known.
    async fn resolve_by_coordinates(&self, latitude: f64, longitude: f64) -> Location;

    /// Current, hourly and daily weather plus best-effort air quality for `location`.
    async fn fetch_snapshot(&self, location: &Location) -> Result<WeatherSnapshot, DashboardError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(
        config.endpoints.clone(),
        config.language.clone(),
        config.timeout(),
    )?;
    Ok(Arc::new(provider))
}
