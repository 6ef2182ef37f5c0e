//! Plain-text rendering of snapshots for the terminal.

use std::fmt::Write;

use skyboard_core::{
    Degradation, Reading, WeatherSnapshot,
    dashboard::CityTile,
    insight::{day_status, insight},
    model::DailyRecord,
    weather_code::{IconKind, icon_for, label_for},
};

/// Hours listed in the hourly section.
const HOURLY_ROWS: usize = 12;
/// Daily probability above which the forecast list shows a badge.
const BADGE_THRESHOLD: u8 = 10;
const PLACEHOLDER: &str = "--";

fn reading(value: Reading) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

fn degrees(value: Reading) -> String {
    format!("{}°", reading(value))
}

pub fn snapshot(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let today = snapshot.today();
    let mut out = String::new();

    let icon = icon_for(current.weather_code, current.is_day);
    let _ = writeln!(out, "{}", snapshot.location.display_name());
    let _ = writeln!(
        out,
        "{}  {}  {}   ↑ {}  ↓ {}",
        icon.glyph(),
        degrees(current.temperature),
        label_for(current.weather_code),
        degrees(today.and_then(|d| d.temp_max)),
        degrees(today.and_then(|d| d.temp_min)),
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Gefühlt {}  ·  Wind {} km/h ({}°, Böen {} km/h)  ·  Feuchte {} %  ·  Niederschlag {} %",
        degrees(current.apparent_temperature),
        reading(current.wind_speed),
        reading(current.wind_direction),
        reading(current.wind_gust),
        reading(current.humidity),
        current.precipitation_probability,
    );
    let _ = writeln!(
        out,
        "Luftdruck {} hPa  ·  Bewölkung {} %  ·  Sicht {} km  ·  UV {}  ·  Schnee {} cm",
        reading(current.pressure),
        reading(current.cloud_cover),
        reading(current.visibility_km),
        reading(current.uv_index),
        reading(current.snow_amount),
    );
    let _ = writeln!(
        out,
        "Luftqualität (EAQI) {}  ·  PM2.5 {} µg/m³",
        reading(current.aqi_european),
        reading(current.pm25),
    );
    let _ = writeln!(
        out,
        "Sonnenaufgang {}  ·  Sonnenuntergang {}",
        current.sunrise_label().as_deref().unwrap_or(PLACEHOLDER),
        current.sunset_label().as_deref().unwrap_or(PLACEHOLDER),
    );
    let _ = writeln!(out, "{}", day_status(current.is_day));
    let _ = writeln!(out, "Tipp: {}", insight(snapshot));

    for degradation in &snapshot.degradations {
        let _ = writeln!(out, "Hinweis: {}", degradation_note(*degradation));
    }

    if !snapshot.hourly.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Stündlich");
        for record in snapshot.hourly.iter().take(HOURLY_ROWS) {
            let icon = icon_for(record.weather_code, current.is_day);
            let _ = writeln!(
                out,
                "  {:<7} {}  {:>4}  {:>3} %",
                record.time_label(),
                icon.glyph(),
                degrees(record.temperature),
                record.precipitation_probability,
            );
        }
    }

    if !snapshot.daily.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Vorhersage");
        for (i, day) in snapshot.daily.iter().enumerate() {
            let _ = writeln!(out, "  {}", forecast_line(i, day));
        }
    }

    out
}

fn degradation_note(degradation: Degradation) -> &'static str {
    match degradation {
        Degradation::AirQuality => "Luftqualitätsdaten sind derzeit nicht verfügbar.",
        Degradation::ReverseGeocoding => "Der Ortsname konnte nicht ermittelt werden.",
    }
}

/// One row of the daily list; the first row is labelled "Heute".
pub fn forecast_line(index: usize, day: &DailyRecord) -> String {
    let weekday = if index == 0 { "Heute" } else { day.weekday_label.as_str() };
    let mut line = format!(
        "{:<6} {}  {}  {:>4} / {:<4}",
        weekday,
        day.date_label(),
        icon_for(day.weather_code, true).glyph(),
        degrees(day.temp_min),
        degrees(day.temp_max),
    );
    if let Some(badge) = precipitation_badge(day) {
        line.push_str("  ");
        line.push_str(&badge);
    }
    line
}

fn precipitation_badge(day: &DailyRecord) -> Option<String> {
    if day.precipitation_probability_max <= BADGE_THRESHOLD {
        return None;
    }
    let kind = if day.is_snow { IconKind::CloudSnow } else { IconKind::CloudRain };
    Some(format!("{} {} %", kind.glyph(), day.precipitation_probability_max))
}

/// One line of the featured cities board.
pub fn tile(tile: &CityTile) -> String {
    match &tile.snapshot {
        Some(snapshot) => {
            let current = &snapshot.current;
            format!(
                "{:<24} {}  {:>4}  {}",
                snapshot.location.display_name(),
                icon_for(current.weather_code, current.is_day).glyph(),
                degrees(current.temperature),
                label_for(current.weather_code),
            )
        }
        None => format!("{:<24} {:>4}  Nicht verfügbar", tile.query, degrees(None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn unavailable_readings_show_placeholder() {
        let mut snapshot = fixtures::snapshot();
        snapshot.current.apparent_temperature = None;

        let text = super::snapshot(&snapshot);
        assert!(text.contains("Gefühlt --°"));
        assert!(text.contains("Luftqualität (EAQI) --  ·  PM2.5 -- µg/m³"));
    }

    #[test]
    fn header_shows_location_and_today_range() {
        let text = super::snapshot(&fixtures::snapshot());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Zürich, Schweiz"));
        let headline = lines.next().expect("headline");
        assert!(headline.contains("3°"));
        assert!(headline.contains("Schneefall"));
        assert!(headline.contains("↑ 4°"));
        assert!(headline.contains("↓ -2°"));
        assert!(text.contains("Sonnenaufgang 08:14  ·  Sonnenuntergang 16:45"));
        assert!(text.contains("Der Tag ist aktiv."));
    }

    #[test]
    fn first_forecast_row_is_today() {
        let snapshot = fixtures::snapshot();
        assert!(forecast_line(0, &snapshot.daily[0]).starts_with("Heute"));
        assert!(forecast_line(1, &snapshot.daily[1]).starts_with("Di."));
    }

    #[test]
    fn badge_only_above_ten_percent() {
        let snapshot = fixtures::snapshot();
        let snowy = forecast_line(0, &snapshot.daily[0]);
        assert!(snowy.ends_with(&format!("{} 80 %", IconKind::CloudSnow.glyph())));

        let rainy = forecast_line(1, &snapshot.daily[1]);
        assert!(rainy.ends_with(&format!("{} 40 %", IconKind::CloudRain.glyph())));

        let dry = forecast_line(2, &snapshot.daily[2]);
        assert!(!dry.contains('%'));

        let mut edge = snapshot.daily[2].clone();
        edge.precipitation_probability_max = 10;
        assert!(precipitation_badge(&edge).is_none());
        edge.precipitation_probability_max = 11;
        assert!(precipitation_badge(&edge).is_some());
    }

    #[test]
    fn degradations_are_noted() {
        let mut snapshot = fixtures::snapshot();
        snapshot.degradations = vec![Degradation::AirQuality];

        let text = super::snapshot(&snapshot);
        assert!(text.contains("Hinweis: Luftqualitätsdaten sind derzeit nicht verfügbar."));
    }

    #[test]
    fn hourly_section_is_capped() {
        let text = super::snapshot(&fixtures::snapshot());
        let rows = text.lines().filter(|l| l.contains(" Uhr ")).count();
        assert_eq!(rows, HOURLY_ROWS);
    }

    #[test]
    fn missing_city_tile() {
        let line = tile(&CityTile {
            query: "Atlantis".into(),
            snapshot: None,
        });
        assert!(line.starts_with("Atlantis"));
        assert!(line.ends_with("Nicht verfügbar"));
    }

    #[test]
    fn city_tile_shows_condition() {
        let line = tile(&CityTile {
            query: "Zürich".into(),
            snapshot: Some(fixtures::snapshot()),
        });
        assert!(line.starts_with("Zürich, Schweiz"));
        assert!(line.ends_with("Schneefall"));
    }
}
