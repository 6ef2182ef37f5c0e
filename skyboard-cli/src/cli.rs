use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use skyboard_core::{
    Config, Coordinates, Dashboard, DashboardError, DashboardState, LoadOutcome, LoadRequest,
    WeatherProvider, WeatherSnapshot,
    chart::{Canvas, precipitation_chart, svg, temperature_chart, uv_chart},
    dashboard::load_board,
    position::ConfiguredPosition,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyboard", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the configuration file.
    Configure,

    /// Show the weather for a city.
    Show {
        /// City name; defaults to `default_city` from the configuration.
        city: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the weather at explicit coordinates.
    Coords {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the weather at the configured home position.
    Here {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Current temperature and condition for every featured city.
    Cities,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the snapshot as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write temperature, precipitation and UV charts as SVG into this directory.
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, output } => {
                let session = Session::open()?;
                let city = city.unwrap_or_else(|| session.config.default_city.clone());
                let snapshot = session.load(LoadRequest::City(city)).await?;
                present(&snapshot, &output)?;
            }
            Command::Coords { lat, lon, output } => {
                let session = Session::open()?;
                let request = LoadRequest::Coordinates(Coordinates {
                    latitude: lat,
                    longitude: lon,
                });
                let snapshot = session.load(request).await?;
                present(&snapshot, &output)?;
            }
            Command::Here { output } => {
                let session = Session::open()?;
                let source = ConfiguredPosition::from_config(&session.config);
                let outcome = session
                    .dashboard
                    .load_here(&source, session.config.timeout())
                    .await;
                let snapshot = settled(&session.dashboard, outcome)?;
                present(&snapshot, &output)?;
            }
            Command::Cities => {
                let session = Session::open()?;
                let tiles = load_board(session.provider.as_ref(), &session.config.featured_cities).await;
                for tile in &tiles {
                    println!("{}", render::tile(tile));
                }
            }
        }

        Ok(())
    }
}

/// Configuration, provider and dashboard for one invocation.
struct Session {
    config: Config,
    provider: Arc<dyn WeatherProvider>,
    dashboard: Dashboard,
}

impl Session {
    fn open() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let provider = provider_from_config(&config)?;
        let dashboard = Dashboard::new(Arc::clone(&provider));
        Ok(Self {
            config,
            provider,
            dashboard,
        })
    }

    async fn load(&self, request: LoadRequest) -> anyhow::Result<Arc<WeatherSnapshot>> {
        let outcome = self.dashboard.load(request).await;
        settled(&self.dashboard, outcome)
    }
}

/// Read the published dashboard state after a load.
fn settled(
    dashboard: &Dashboard,
    outcome: Result<LoadOutcome, DashboardError>,
) -> anyhow::Result<Arc<WeatherSnapshot>> {
    if let Err(err) = &outcome {
        tracing::debug!("Load failed: {:?}", err);
    }

    match dashboard.state() {
        DashboardState::Ready(snapshot) => Ok(snapshot),
        DashboardState::Failed(message) => Err(anyhow!(message)),
        other => Err(anyhow!("Dashboard did not settle: {:?}", other)),
    }
}

fn present(snapshot: &WeatherSnapshot, output: &OutputArgs) -> anyhow::Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        println!("{json}");
    } else {
        print!("{}", render::snapshot(snapshot));
    }

    if let Some(dir) = &output.charts {
        for path in write_charts(dir, snapshot)? {
            println!("Diagramm gespeichert: {}", path.display());
        }
    }
    Ok(())
}

fn write_charts(dir: &std::path::Path, snapshot: &WeatherSnapshot) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory {}", dir.display()))?;

    let scenes = [
        temperature_chart(&snapshot.hourly, &Canvas::TEMPERATURE),
        precipitation_chart(&snapshot.hourly, &Canvas::HOURLY_BARS),
        uv_chart(&snapshot.hourly, &Canvas::HOURLY_BARS),
    ];

    let mut written = Vec::with_capacity(scenes.len());
    for scene in &scenes {
        let path = dir.join(format!("{}.svg", scene.kind.file_stem()));
        fs::write(&path, svg::render(scene))
            .with_context(|| format!("Failed to write chart {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.language = Text::new("Sprache für Ortsnamen:")
        .with_default(&config.language)
        .prompt()?;

    config.default_city = Text::new("Standardstadt:")
        .with_default(&config.default_city)
        .prompt()?;

    let featured = Text::new("Städte für die Übersicht (durch Komma getrennt):")
        .with_default(&config.featured_cities.join(", "))
        .prompt()?;
    config.featured_cities = parse_city_list(&featured);

    config.share_location = Confirm::new("Standortabfrage erlauben?")
        .with_default(config.share_location)
        .prompt()?;

    if config.share_location {
        let set_home = Confirm::new("Heimatkoordinaten festlegen?")
            .with_default(config.home.is_some())
            .prompt()?;
        config.home = if set_home {
            Some(prompt_coordinates(config.home)?)
        } else {
            None
        };
    }

    let path = config.save()?;
    println!("Konfiguration gespeichert: {}", path.display());
    Ok(())
}

fn prompt_coordinates(current: Option<Coordinates>) -> anyhow::Result<Coordinates> {
    let mut latitude = CustomType::<f64>::new("Breitengrad:")
        .with_error_message("Bitte eine Zahl eingeben, z. B. 47.37");
    let mut longitude = CustomType::<f64>::new("Längengrad:")
        .with_error_message("Bitte eine Zahl eingeben, z. B. 8.54");
    if let Some(home) = current {
        latitude = latitude.with_default(home.latitude);
        longitude = longitude.with_default(home.longitude);
    }

    Ok(Coordinates {
        latitude: latitude.prompt()?,
        longitude: longitude.prompt()?,
    })
}

fn parse_city_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_defaults_to_configured_city() {
        let cli = Cli::try_parse_from(["skyboard", "show"]).expect("should parse");
        assert!(matches!(cli.command, Command::Show { city: None, .. }));
    }

    #[test]
    fn show_accepts_output_flags() {
        let cli = Cli::try_parse_from(["skyboard", "-v", "show", "Bern", "--json", "--charts", "out"])
            .expect("should parse");
        assert!(cli.verbose);
        match cli.command {
            Command::Show { city, output } => {
                assert_eq!(city.as_deref(), Some("Bern"));
                assert!(output.json);
                assert_eq!(output.charts, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn coords_accept_negative_values() {
        let cli = Cli::try_parse_from(["skyboard", "coords", "--lat", "-33.87", "--lon", "151.21"])
            .expect("should parse");
        assert!(matches!(
            cli.command,
            Command::Coords { lat, lon, .. } if lat == -33.87 && lon == 151.21
        ));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["skyboard", "-v", "-q", "cities"]).is_err());
    }

    #[test]
    fn city_list_is_trimmed() {
        assert_eq!(
            parse_city_list(" Zürich, ,Bern ,New York"),
            vec!["Zürich", "Bern", "New York"]
        );
    }

    #[test]
    fn charts_are_written() {
        let dir = std::env::temp_dir().join(format!("skyboard-charts-{}", std::process::id()));
        let snapshot = crate::fixtures::snapshot();

        let written = write_charts(&dir, &snapshot).expect("charts should be written");
        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, ["temperature.svg", "precipitation.svg", "uv.svg"]);
        for path in &written {
            let body = fs::read_to_string(path).expect("chart should be readable");
            assert!(body.starts_with("<svg"));
        }

        fs::remove_dir_all(&dir).ok();
    }
}
