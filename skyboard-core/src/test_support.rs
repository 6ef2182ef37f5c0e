//! Shared fixtures for unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};

use crate::{
    model::{Location, WeatherSnapshot},
    normalize::build_snapshot,
    provider::schema::{Forecast, ForecastResponse},
};

const FORECAST_JSON: &str = include_str!("../tests/fixtures/forecast.json");

/// 2024-01-01T12:00 shifted by `offset` hours; matches `current.time` of the fixture at 0.
pub fn hour(offset: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("fixture base time is valid")
        + Duration::hours(offset)
}

pub fn forecast_fixture() -> Forecast {
    let raw: ForecastResponse =
        serde_json::from_str(FORECAST_JSON).expect("fixture should deserialize");
    raw.validate().expect("fixture should validate")
}

pub fn location_fixture() -> Location {
    Location {
        name: "Zürich".into(),
        country: "Schweiz".into(),
        latitude: 47.36667,
        longitude: 8.55,
    }
}

pub fn snapshot_fixture() -> WeatherSnapshot {
    build_snapshot(
        location_fixture(),
        &forecast_fixture(),
        None,
        Utc::now(),
        Vec::new(),
    )
}
