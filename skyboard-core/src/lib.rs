//! Core library for the `skyboard` weather dashboard.
//!
//! This crate defines:
//! - Location lookup and forecast retrieval (Open-Meteo)
//! - Normalisation of raw series into display-ready records
//! - Chart geometry as a scene graph, plus an SVG renderer
//! - Application state with "latest request wins" semantics
//! - Configuration handling
//!
//! It is used by `skyboard-cli`, but holds no terminal-specific code.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod insight;
pub mod model;
pub mod normalize;
pub mod position;
pub mod provider;
pub mod weather_code;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, Endpoints};
pub use dashboard::{Dashboard, DashboardState, LoadOutcome, LoadRequest};
pub use error::{DashboardError, GeolocationError};
pub use model::{
    CurrentConditions, DailyRecord, Degradation, HourlyRecord, Location, Reading, WeatherSnapshot,
};
pub use position::{Coordinates, PositionSource};
pub use provider::{WeatherProvider, provider_from_config};
pub use weather_code::{WeatherCode, classify, is_snow_code};
