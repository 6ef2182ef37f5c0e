use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::position::Coordinates;

/// Base URLs of the three Open-Meteo services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub air_quality: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: "https://geocoding-api.open-meteo.com".to_string(),
            forecast: "https://api.open-meteo.com".to_string(),
            air_quality: "https://air-quality-api.open-meteo.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at one base URL (used with local mock servers).
    pub fn all_at(base: &str) -> Self {
        Self {
            geocoding: base.to_string(),
            forecast: base.to_string(),
            air_quality: base.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// language = "de"
/// default_city = "Zürich"
/// featured_cities = ["Zürich", "Bern"]
/// share_location = true
///
/// [home]
/// latitude = 47.37
/// longitude = 8.54
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language passed to the geocoding service.
    pub language: String,
    pub default_city: String,
    pub featured_cities: Vec<String>,
    /// Coordinates reported as "my location".
    pub home: Option<Coordinates>,
    /// When false, location lookups are refused.
    pub share_location: bool,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "de".to_string(),
            default_city: "Zürich".to_string(),
            featured_cities: ["Zürich", "Bern", "Berlin", "London", "Paris", "New York"]
                .into_iter()
                .map(String::from)
                .collect(),
            home: None,
            share_location: true,
            timeout_secs: 10,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyboard", "skyboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.language, "de");
        assert_eq!(cfg.default_city, "Zürich");
        assert_eq!(cfg.featured_cities.len(), 6);
        assert!(cfg.endpoints.forecast.starts_with("https://api.open-meteo.com"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            default_city = "Bern"

            [home]
            latitude = 46.95
            longitude = 7.45
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.default_city, "Bern");
        assert_eq!(cfg.language, "de");
        assert_eq!(cfg.timeout_secs, 10);
        assert!(cfg.share_location);
        assert_eq!(
            cfg.home,
            Some(Coordinates {
                latitude: 46.95,
                longitude: 7.45
            })
        );
    }

    #[test]
    fn zero_timeout_is_raised() {
        let cfg = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("skyboard-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let cfg = Config {
            featured_cities: vec!["Oslo".into()],
            ..Config::default()
        };
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(dir);
    }
}
