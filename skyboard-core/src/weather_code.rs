use serde::{Deserialize, Serialize};

/// WMO weather interpretation code as reported by the forecast provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub i32);

impl WeatherCode {
    pub fn condition(self) -> Condition {
        Condition::from_code(self.0)
    }

    pub fn is_snow(self) -> bool {
        is_snow_code(self.0)
    }
}

/// Sky/precipitation condition, one per disjoint WMO code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snowfall,
    Showers,
    SnowShowers,
    Thunderstorm,
    Unknown,
}

impl Condition {
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MostlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45..=48 => Self::Fog,
            51..=55 => Self::Drizzle,
            56..=57 => Self::FreezingDrizzle,
            61..=65 => Self::Rain,
            66..=67 => Self::FreezingRain,
            71..=77 => Self::Snowfall,
            80..=82 => Self::Showers,
            85..=86 => Self::SnowShowers,
            c if c >= 95 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Klar",
            Self::MostlyClear => "Überwiegend klar",
            Self::PartlyCloudy => "Teils bewölkt",
            Self::Overcast => "Bedeckt",
            Self::Fog => "Nebel",
            Self::Drizzle => "Nieselregen",
            Self::FreezingDrizzle => "Eisregen",
            Self::Rain => "Regen",
            Self::FreezingRain => "Gefrierender Regen",
            Self::Snowfall => "Schneefall",
            Self::Showers => "Schauer",
            Self::SnowShowers => "Schneeschauer",
            Self::Thunderstorm => "Gewitter",
            Self::Unknown => "Unbekannt",
        }
    }

    /// Daytime icon for this condition.
    pub fn icon(&self) -> IconKind {
        match self {
            Self::Clear | Self::MostlyClear | Self::Unknown => IconKind::Sun,
            Self::PartlyCloudy => IconKind::CloudSun,
            Self::Overcast => IconKind::Cloud,
            Self::Fog => IconKind::Cloudy,
            Self::Drizzle => IconKind::CloudDrizzle,
            Self::Rain | Self::Showers => IconKind::CloudRain,
            Self::FreezingDrizzle | Self::FreezingRain | Self::Snowfall | Self::SnowShowers => {
                IconKind::CloudSnow
            }
            Self::Thunderstorm => IconKind::CloudLightning,
        }
    }
}

/// Icon glyph family used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloud,
    Cloudy,
    CloudDrizzle,
    CloudRain,
    CloudSnow,
    CloudLightning,
}

impl IconKind {
    /// Swap sun-family glyphs for their moon counterparts at night.
    pub fn for_time_of_day(self, is_day: bool) -> Self {
        match (self, is_day) {
            (Self::Sun, false) => Self::Moon,
            (Self::CloudSun, false) => Self::CloudMoon,
            (other, _) => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::CloudSun => "cloud-sun",
            Self::CloudMoon => "cloud-moon",
            Self::Cloud => "cloud",
            Self::Cloudy => "cloudy",
            Self::CloudDrizzle => "cloud-drizzle",
            Self::CloudRain => "cloud-rain",
            Self::CloudSnow => "cloud-snow",
            Self::CloudLightning => "cloud-lightning",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Sun => "#fcd34d",
            Self::Moon => "#e2e8f0",
            Self::CloudSun | Self::CloudMoon | Self::Cloud => "#cbd5e1",
            Self::Cloudy => "#94a3b8",
            Self::CloudDrizzle | Self::CloudRain => "#93c5fd",
            Self::CloudSnow => "#a5f3fc",
            Self::CloudLightning => "#c4b5fd",
        }
    }

    /// Terminal stand-in for the vector glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::CloudSun => "⛅",
            Self::CloudMoon => "☁",
            Self::Cloud => "☁",
            Self::Cloudy => "🌫",
            Self::CloudDrizzle => "🌦",
            Self::CloudRain => "🌧",
            Self::CloudSnow => "🌨",
            Self::CloudLightning => "🌩",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub condition: Condition,
    pub label: &'static str,
    pub icon: IconKind,
}

pub fn classify(code: i32) -> Classification {
    let condition = Condition::from_code(code);
    Classification {
        condition,
        label: condition.label(),
        icon: condition.icon(),
    }
}

/// Icon for an optional code; a missing code renders like an unknown one.
pub fn icon_for(code: Option<WeatherCode>, is_day: bool) -> IconKind {
    code.map(WeatherCode::condition)
        .unwrap_or(Condition::Unknown)
        .icon()
        .for_time_of_day(is_day)
}

pub fn label_for(code: Option<WeatherCode>) -> &'static str {
    code.map(WeatherCode::condition)
        .unwrap_or(Condition::Unknown)
        .label()
}

pub fn is_snow_code(code: i32) -> bool {
    matches!(code, 56..=57 | 66..=67 | 71..=77 | 85..=86)
}
