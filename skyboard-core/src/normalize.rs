//! Pure mapping from validated forecast series to display-ready records.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::{
    model::{
        weekday_label, CurrentConditions, DailyRecord, Degradation, HourlyRecord, Location, Reading,
        WeatherSnapshot,
    },
    provider::schema::{AirQualitySeries, DailySeries, Forecast, HourlySeries},
    weather_code::{is_snow_code, WeatherCode},
};

/// Number of hourly records kept from the current hour onward.
pub const HOURLY_WINDOW: usize = 24;

/// Temperature at or below which any precipitation counts as snow.
const SNOW_TEMPERATURE_C: f64 = 1.0;

/// Index of the "current hour" within `times`.
///
/// Preference order: an exact match for `reference`, the latest timestamp not
/// after `now`, the first timestamp at or after `now`, and finally 0. The result
/// is always a valid index when `times` is non-empty.
pub fn current_hour_index(
    times: &[NaiveDateTime],
    reference: NaiveDateTime,
    now: NaiveDateTime,
) -> usize {
    times
        .iter()
        .position(|t| *t == reference)
        .or_else(|| times.iter().rposition(|t| *t <= now))
        .or_else(|| times.iter().position(|t| *t >= now))
        .unwrap_or(0)
}

/// Wall-clock time at the forecast location.
pub fn local_now(now: DateTime<Utc>, utc_offset_seconds: i32) -> NaiveDateTime {
    now.naive_utc() + Duration::seconds(i64::from(utc_offset_seconds))
}

pub fn hourly_records(series: &HourlySeries, start: usize) -> Vec<HourlyRecord> {
    series
        .time
        .iter()
        .enumerate()
        .skip(start)
        .take(HOURLY_WINDOW)
        .map(|(idx, timestamp)| {
            let temperature = finite_at(&series.temperature, idx);
            let precipitation_probability = percentage(finite_at(&series.precipitation_probability, idx));
            let code = series.weather_code.get(idx).copied().flatten();

            HourlyRecord {
                timestamp: *timestamp,
                temperature: round_reading(temperature),
                precipitation_probability,
                weather_code: code.map(WeatherCode),
                is_snow: derive_is_snow(code, temperature, precipitation_probability),
                uv_index: round_reading(finite_at(&series.uv_index, idx)),
            }
        })
        .collect()
}

pub fn daily_records(series: &DailySeries) -> Vec<DailyRecord> {
    series
        .time
        .iter()
        .enumerate()
        .map(|(idx, date)| {
            let code = series.weather_code.get(idx).copied().flatten();
            let temp_min = finite_at(&series.temperature_min, idx);
            let precipitation_probability_max =
                percentage(finite_at(&series.precipitation_probability_max, idx));
            let snowfall = finite_at(&series.snowfall_sum, idx);

            DailyRecord {
                date: *date,
                weekday_label: weekday_label(*date).to_string(),
                temp_min: round_reading(temp_min),
                temp_max: round_reading(finite_at(&series.temperature_max, idx)),
                weather_code: code.map(WeatherCode),
                precipitation_probability_max,
                is_snow: derive_is_snow(code, temp_min, precipitation_probability_max)
                    || snowfall.is_some_and(|s| s > 0.0),
            }
        })
        .collect()
}

/// Current conditions at `hour_index`, with air quality taken from its own
/// independently aligned index.
pub fn current_conditions(
    forecast: &Forecast,
    hour_index: usize,
    air: Option<(&AirQualitySeries, usize)>,
) -> CurrentConditions {
    let current = &forecast.current;
    let daily = &forecast.daily;

    let pressure = finite(current.pressure_msl).or_else(|| finite(current.surface_pressure));
    let uv_index = finite(current.uv_index).or_else(|| finite_at(&daily.uv_index_max, 0));
    let visibility_km = finite_at(&forecast.hourly.visibility, hour_index).map(|m| m / 1000.0);

    let (aqi_european, pm25) = match air {
        Some((series, idx)) => (
            round_reading(finite_at(&series.european_aqi, idx)),
            round_reading(finite_at(&series.pm25, idx)),
        ),
        None => (None, None),
    };

    CurrentConditions {
        observed_at: current.time,
        weather_code: current.weather_code.map(WeatherCode),
        temperature: round_reading(finite(current.temperature)),
        apparent_temperature: round_reading(finite(current.apparent_temperature)),
        humidity: round_reading(finite(current.humidity)),
        pressure: round_reading(pressure),
        wind_speed: round_reading(finite(current.wind_speed)),
        wind_direction: round_reading(finite(current.wind_direction)),
        wind_gust: round_reading(finite(current.wind_gust)),
        cloud_cover: round_reading(finite(current.cloud_cover)),
        visibility_km: round_reading(visibility_km),
        uv_index: round_reading(uv_index),
        snow_amount: round_reading(finite_at(&daily.snowfall_sum, 0)),
        aqi_european,
        pm25,
        precipitation_probability: percentage(finite_at(&daily.precipitation_probability_max, 0)),
        is_day: current.is_day,
        sunrise: daily.sunrise.first().copied().flatten(),
        sunset: daily.sunset.first().copied().flatten(),
    }
}

/// Assemble a snapshot. Both time series are aligned to the same current hour,
/// each against its own timestamps.
pub fn build_snapshot(
    location: Location,
    forecast: &Forecast,
    air_quality: Option<&AirQualitySeries>,
    now: DateTime<Utc>,
    degradations: Vec<Degradation>,
) -> WeatherSnapshot {
    let local = local_now(now, forecast.utc_offset_seconds);
    let reference = forecast.current.time;

    let hour_index = current_hour_index(&forecast.hourly.time, reference, local);
    let air = air_quality.map(|series| (series, current_hour_index(&series.time, reference, local)));

    WeatherSnapshot {
        location,
        current: current_conditions(forecast, hour_index, air),
        hourly: hourly_records(&forecast.hourly, hour_index),
        daily: daily_records(&forecast.daily),
        degradations,
    }
}

pub fn derive_is_snow(code: Option<i32>, temperature: Option<f64>, precipitation_probability: u8) -> bool {
    code.is_some_and(is_snow_code)
        || (temperature.is_some_and(|t| t <= SNOW_TEMPERATURE_C) && precipitation_probability > 0)
}

/// Round half away from zero; non-finite input becomes "unavailable".
pub fn round_reading(value: Option<f64>) -> Reading {
    finite(value).map(|v| v.round() as i32)
}

/// Probabilities drive chart geometry, so a missing value is 0 rather than unavailable.
pub fn percentage(value: Option<f64>) -> u8 {
    finite(value).map_or(0, |v| v.round().clamp(0.0, 100.0) as u8)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn finite_at(series: &[Option<f64>], idx: usize) -> Option<f64> {
    finite(series.get(idx).copied().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{forecast_fixture, hour, location_fixture};

    #[test]
    fn exact_reference_match_wins() {
        let times: Vec<_> = (0..5).map(hour).collect();
        assert_eq!(current_hour_index(&times, hour(3), hour(1)), 3);
    }

    #[test]
    fn latest_past_hour_when_no_exact_match() {
        let times: Vec<_> = (0..5).map(hour).collect();
        let reference = hour(2) + Duration::minutes(15);
        assert_eq!(current_hour_index(&times, reference, reference), 2);
    }

    #[test]
    fn first_future_hour_when_series_starts_later() {
        let times: Vec<_> = (5..10).map(hour).collect();
        assert_eq!(current_hour_index(&times, hour(0), hour(1)), 0);
    }

    #[test]
    fn empty_series_yields_zero() {
        assert_eq!(current_hour_index(&[], hour(0), hour(0)), 0);
    }

    #[test]
    fn hourly_window_is_capped_at_24() {
        let forecast = forecast_fixture();
        let records = hourly_records(&forecast.hourly, 2);
        assert_eq!(records.len(), HOURLY_WINDOW);
        assert_eq!(records[0].timestamp, forecast.hourly.time[2]);
        assert!(records.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn hourly_window_shrinks_near_end() {
        let forecast = forecast_fixture();
        let len = forecast.hourly.time.len();
        assert_eq!(hourly_records(&forecast.hourly, len - 3).len(), 3);
    }

    #[test]
    fn missing_precipitation_becomes_zero() {
        let mut forecast = forecast_fixture();
        forecast.hourly.precipitation_probability[0] = None;
        forecast.hourly.precipitation_probability[1] = Some(f64::NAN);

        let records = hourly_records(&forecast.hourly, 0);
        assert_eq!(records[0].precipitation_probability, 0);
        assert_eq!(records[1].precipitation_probability, 0);
    }

    #[test]
    fn cold_precipitation_counts_as_snow() {
        assert!(derive_is_snow(Some(61), Some(0.4), 30));
        assert!(derive_is_snow(Some(61), Some(1.0), 5));
        assert!(!derive_is_snow(Some(61), Some(1.2), 30));
        assert!(!derive_is_snow(Some(3), Some(-5.0), 0));
        assert!(derive_is_snow(Some(73), Some(10.0), 0));
        assert!(!derive_is_snow(None, None, 90));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_reading(Some(2.5)), Some(3));
        assert_eq!(round_reading(Some(-2.5)), Some(-3));
        assert_eq!(round_reading(Some(f64::INFINITY)), None);
        assert_eq!(round_reading(None), None);
    }

    #[test]
    fn percentage_clamps() {
        assert_eq!(percentage(Some(140.0)), 100);
        assert_eq!(percentage(Some(-3.0)), 0);
        assert_eq!(percentage(Some(42.4)), 42);
    }

    #[test]
    fn daily_records_follow_day_count() {
        let forecast = forecast_fixture();
        let days = daily_records(&forecast.daily);
        assert_eq!(days.len(), forecast.daily.time.len());
        assert_eq!(days[0].weekday_label, "Mo.");
        assert_eq!(days[0].temp_min, Some(-2));
        assert_eq!(days[0].temp_max, Some(4));
    }

    #[test]
    fn daily_snowfall_marks_snow() {
        let mut forecast = forecast_fixture();
        forecast.daily.weather_code[1] = Some(3);
        forecast.daily.temperature_min[1] = Some(5.0);
        forecast.daily.snowfall_sum[1] = Some(0.4);
        assert!(daily_records(&forecast.daily)[1].is_snow);
    }

    #[test]
    fn current_conditions_fallbacks() {
        let mut forecast = forecast_fixture();
        forecast.current.pressure_msl = None;
        forecast.current.surface_pressure = Some(963.6);
        forecast.current.uv_index = None;

        let current = current_conditions(&forecast, 0, None);
        assert_eq!(current.pressure, Some(964));
        assert_eq!(current.uv_index, Some(2));
        assert_eq!(current.aqi_european, None);
        assert_eq!(current.pm25, None);
        assert_eq!(current.visibility_km, Some(25));
        assert_eq!(current.sunrise_label().as_deref(), Some("08:14"));
    }

    #[test]
    fn air_quality_is_aligned_on_its_own_series() {
        let forecast = forecast_fixture();
        let air = AirQualitySeries {
            time: (-3..10).map(hour).collect(),
            pm25: (0..13).map(|v| Some(f64::from(v))).collect(),
            european_aqi: (0..13).map(|v| Some(f64::from(v * 10))).collect(),
        };

        let snapshot = build_snapshot(
            location_fixture(),
            &forecast,
            Some(&air),
            Utc::now(),
            Vec::new(),
        );

        // current.time is hour(0), which sits at index 3 of the air series
        assert_eq!(snapshot.current.pm25, Some(3));
        assert_eq!(snapshot.current.aqi_european, Some(30));
        assert_eq!(snapshot.hourly[0].timestamp, hour(0));
    }
}
