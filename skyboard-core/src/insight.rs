use crate::model::WeatherSnapshot;

const RAIN_LIKELY: u8 = 70;
const UV_HIGH: i32 = 7;
const WIND_STRONG_KMH: i32 = 30;

/// One-line advice for the day, built from today's headline values.
pub fn insight(snapshot: &WeatherSnapshot) -> String {
    let current = &snapshot.current;
    let mut parts = Vec::new();

    if current.precipitation_probability >= RAIN_LIKELY {
        parts.push("Hohe Regenwahrscheinlichkeit – Regenjacke mitnehmen.");
    } else if current.snow_amount.is_some_and(|s| s > 0) {
        parts.push("Schnee erwartet – warme Kleidung einplanen.");
    }
    if current.uv_index.is_some_and(|uv| uv >= UV_HIGH) {
        parts.push("UV-Index hoch – Sonnenschutz nicht vergessen.");
    }
    if current.wind_speed.is_some_and(|w| w >= WIND_STRONG_KMH) {
        parts.push("Starker Wind – Achtung bei Fahrrad oder Schirm.");
    }

    if parts.is_empty() {
        return "Gute Bedingungen – einfach rausgehen und genießen.".to_string();
    }
    parts.join(" ")
}

pub fn day_status(is_day: bool) -> &'static str {
    if is_day {
        "Der Tag ist aktiv. Genieße das Licht."
    } else {
        "Die Nacht ist hereingebrochen."
    }
}
