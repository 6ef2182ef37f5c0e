//! Snapshot builders shared by the CLI unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use skyboard_core::{
    CurrentConditions, DailyRecord, HourlyRecord, Location, WeatherCode, WeatherSnapshot,
    model::weekday_label,
};

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).expect("valid fixture time")
}

pub fn snapshot() -> WeatherSnapshot {
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date");
    let start = at(today, 12, 0);

    let hourly = (0..24)
        .map(|i| HourlyRecord {
            timestamp: start + Duration::hours(i),
            temperature: Some(5 - i as i32 / 4),
            precipitation_probability: (i as u8 * 4).min(100),
            weather_code: Some(WeatherCode(if i < 6 { 71 } else { 3 })),
            is_snow: i < 6,
            uv_index: Some(if i < 4 { 2 } else { 0 }),
        })
        .collect();

    let daily = [(71, -2, 4, 80, true), (61, 1, 6, 40, false), (0, 0, 8, 5, false)]
        .into_iter()
        .enumerate()
        .map(|(i, (code, min, max, prob, snow))| {
            let date = today + Duration::days(i as i64);
            DailyRecord {
                date,
                weekday_label: weekday_label(date).to_string(),
                temp_min: Some(min),
                temp_max: Some(max),
                weather_code: Some(WeatherCode(code)),
                precipitation_probability_max: prob,
                is_snow: snow,
            }
        })
        .collect();

    WeatherSnapshot {
        location: Location {
            name: "Zürich".into(),
            country: "Schweiz".into(),
            latitude: 47.37,
            longitude: 8.54,
        },
        current: CurrentConditions {
            observed_at: start,
            weather_code: Some(WeatherCode(71)),
            temperature: Some(3),
            apparent_temperature: Some(-1),
            humidity: Some(81),
            pressure: Some(1012),
            wind_speed: Some(12),
            wind_direction: Some(240),
            wind_gust: Some(32),
            cloud_cover: Some(100),
            visibility_km: Some(25),
            uv_index: Some(1),
            snow_amount: Some(1),
            aqi_european: None,
            pm25: None,
            precipitation_probability: 80,
            is_day: true,
            sunrise: Some(at(today, 8, 14)),
            sunset: Some(at(today, 16, 45)),
        },
        hourly,
        daily,
        degradations: Vec::new(),
    }
}
