use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::weather_code::WeatherCode;

/// Name shown when neither the caller nor reverse geocoding supplied one.
pub const UNKNOWN_PLACE_NAME: &str = "Dein Standort";

/// A rounded measurement, `None` when the provider had no finite value.
pub type Reading = Option<i32>;

/// Resolved place. Name and country may be empty for coordinate-based entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            name: String::new(),
            country: String::new(),
            latitude,
            longitude,
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// "Name, Country", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub timestamp: NaiveDateTime,
    pub temperature: Reading,
    pub precipitation_probability: u8,
    pub weather_code: Option<WeatherCode>,
    pub is_snow: bool,
    pub uv_index: Reading,
}

impl HourlyRecord {
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H Uhr").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weekday_label: String,
    pub temp_min: Reading,
    pub temp_max: Reading,
    pub weather_code: Option<WeatherCode>,
    pub precipitation_probability_max: u8,
    pub is_snow: bool,
}

impl DailyRecord {
    pub fn date_label(&self) -> String {
        self.date.format("%d.%m.").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observed_at: NaiveDateTime,
    pub weather_code: Option<WeatherCode>,
    pub temperature: Reading,
    pub apparent_temperature: Reading,
    pub humidity: Reading,
    pub pressure: Reading,
    pub wind_speed: Reading,
    pub wind_direction: Reading,
    pub wind_gust: Reading,
    pub cloud_cover: Reading,
    pub visibility_km: Reading,
    pub uv_index: Reading,
    pub snow_amount: Reading,
    pub aqi_european: Reading,
    pub pm25: Reading,
    /// Today's maximum precipitation probability.
    pub precipitation_probability: u8,
    pub is_day: bool,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

impl CurrentConditions {
    pub fn sunrise_label(&self) -> Option<String> {
        self.sunrise.map(|t| t.format("%H:%M").to_string())
    }

    pub fn sunset_label(&self) -> Option<String> {
        self.sunset.map(|t| t.format("%H:%M").to_string())
    }
}

/// A secondary lookup that failed without invalidating the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    AirQuality,
    ReverseGeocoding,
}

/// Everything the presentation layer needs for one location, built once per load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyRecord>,
    pub daily: Vec<DailyRecord>,
    pub degradations: Vec<Degradation>,
}

impl WeatherSnapshot {
    pub fn today(&self) -> Option<&DailyRecord> {
        self.daily.first()
    }

    pub fn is_degraded(&self, degradation: Degradation) -> bool {
        self.degradations.contains(&degradation)
    }
}

/// German short weekday, e.g. "Mo.".
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mo.",
        Weekday::Tue => "Di.",
        Weekday::Wed => "Mi.",
        Weekday::Thu => "Do.",
        Weekday::Fri => "Fr.",
        Weekday::Sat => "Sa.",
        Weekday::Sun => "So.",
    }
}
