//! Wire shapes of the Open-Meteo endpoints and their validated counterparts.
//!
//! Raw structs mirror the JSON with every field optional. [`ForecastResponse::validate`]
//! and [`AirQualityResponse::validate`] check them once so that normalisation can
//! work on typed series without ad-hoc presence checks.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("response has no '{0}' section")]
    MissingSection(&'static str),
    #[error("invalid timestamp '{value}' in '{field}'")]
    InvalidTime { field: &'static str, value: String },
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodingResponse {
    pub fn into_first(self) -> Option<GeocodingResult> {
        self.results.and_then(|r| r.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub current: Option<RawCurrent>,
    pub hourly: Option<RawHourly>,
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Deserialize)]
pub struct RawCurrent {
    pub time: String,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub is_day: Option<f64>,
    pub weather_code: Option<i32>,
    pub cloud_cover: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub wind_gusts_10m: Option<f64>,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct RawDaily {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    pub snowfall_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityResponse {
    pub hourly: Option<RawAirHourly>,
}

#[derive(Debug, Deserialize)]
pub struct RawAirHourly {
    pub time: Vec<String>,
    #[serde(default)]
    pub pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    pub european_aqi: Vec<Option<f64>>,
}

/// Forecast payload with all three sections present and timestamps parsed.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub utc_offset_seconds: i32,
    pub current: CurrentBlock,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone)]
pub struct CurrentBlock {
    pub time: NaiveDateTime,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub is_day: bool,
    pub weather_code: Option<i32>,
    pub cloud_cover: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub surface_pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_gust: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Parallel, time-indexed hourly arrays. Value arrays may be shorter than `time`.
#[derive(Debug, Clone)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub visibility: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<NaiveDateTime>>,
    pub sunset: Vec<Option<NaiveDateTime>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub snowfall_sum: Vec<Option<f64>>,
    pub uv_index_max: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct AirQualitySeries {
    pub time: Vec<NaiveDateTime>,
    pub pm25: Vec<Option<f64>>,
    pub european_aqi: Vec<Option<f64>>,
}

impl ForecastResponse {
    pub fn validate(self) -> Result<Forecast, SchemaError> {
        let current = self.current.ok_or(SchemaError::MissingSection("current"))?;
        let hourly = self.hourly.ok_or(SchemaError::MissingSection("hourly"))?;
        let daily = self.daily.ok_or(SchemaError::MissingSection("daily"))?;

        let current = CurrentBlock {
            time: parse_local_time("current.time", &current.time)?,
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            apparent_temperature: current.apparent_temperature,
            is_day: current.is_day.is_some_and(|v| v == 1.0),
            weather_code: current.weather_code,
            cloud_cover: current.cloud_cover,
            pressure_msl: current.pressure_msl,
            surface_pressure: current.surface_pressure,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            wind_gust: current.wind_gusts_10m,
            uv_index: current.uv_index,
        };

        let hourly = HourlySeries {
            time: parse_times("hourly.time", &hourly.time)?,
            temperature: hourly.temperature_2m,
            precipitation_probability: hourly.precipitation_probability,
            weather_code: hourly.weather_code,
            visibility: hourly.visibility,
            uv_index: hourly.uv_index,
        };

        let daily = DailySeries {
            time: daily
                .time
                .iter()
                .map(|t| parse_date("daily.time", t))
                .collect::<Result<_, _>>()?,
            weather_code: daily.weather_code,
            temperature_max: daily.temperature_2m_max,
            temperature_min: daily.temperature_2m_min,
            sunrise: parse_optional_times("daily.sunrise", &daily.sunrise)?,
            sunset: parse_optional_times("daily.sunset", &daily.sunset)?,
            precipitation_probability_max: daily.precipitation_probability_max,
            snowfall_sum: daily.snowfall_sum,
            uv_index_max: daily.uv_index_max,
        };

        Ok(Forecast {
            utc_offset_seconds: self.utc_offset_seconds,
            current,
            hourly,
            daily,
        })
    }
}

impl AirQualityResponse {
    pub fn validate(self) -> Result<AirQualitySeries, SchemaError> {
        let hourly = self.hourly.ok_or(SchemaError::MissingSection("hourly"))?;
        Ok(AirQualitySeries {
            time: parse_times("air_quality.hourly.time", &hourly.time)?,
            pm25: hourly.pm2_5,
            european_aqi: hourly.european_aqi,
        })
    }
}

/// Open-Meteo with `timezone=auto` reports local wall-clock times without offset.
pub fn parse_local_time(field: &'static str, value: &str) -> Result<NaiveDateTime, SchemaError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| SchemaError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, SchemaError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SchemaError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

fn parse_times(field: &'static str, values: &[String]) -> Result<Vec<NaiveDateTime>, SchemaError> {
    values.iter().map(|v| parse_local_time(field, v)).collect()
}

fn parse_optional_times(
    field: &'static str,
    values: &[Option<String>],
) -> Result<Vec<Option<NaiveDateTime>>, SchemaError> {
    values
        .iter()
        .map(|v| v.as_deref().map(|s| parse_local_time(field, s)).transpose())
        .collect()
}
