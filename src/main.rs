//! CLI interface for weather-mood

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use weather_mood::console::ConsolePresenter;
use weather_mood::suggest::label_for;
use weather_mood::{
    FixedPosition, Geolocator, LocateMode, LocationCache, ProxyClient, SuggestionEngine,
    UserLocation, WeatherController, WeatherMoodConfig, WeatherPresenter, logging,
};

#[derive(Parser)]
#[command(name = "weather-mood")]
#[command(about = "Current weather, a five-day outlook and nearby-first city suggestions")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to <config dir>/weather-mood/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Weather proxy endpoint, overriding the configured one
    #[arg(long, global = true)]
    proxy_url: Option<String>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current weather and forecast
    Weather {
        /// City name
        #[arg(long, required_unless_present = "lat", conflicts_with = "lat")]
        city: Option<String>,
        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Ranked place suggestions for a partial name
    Suggest {
        query: String,
        /// Rank relative to "<lat>,<lon>" instead of the configured position
        #[arg(long, allow_hyphen_values = true)]
        near: Option<String>,
    },
    /// Type to get suggestions; /select, /search, /locate and /quit act on them
    Interactive,
}

/// One line of interactive input
#[derive(Debug, PartialEq)]
enum InteractiveCommand<'a> {
    Input(&'a str),
    Select(&'a str),
    Search(&'a str),
    Locate,
    Quit,
}

impl<'a> InteractiveCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim();
        if let Some(label) = trimmed.strip_prefix("/select ") {
            return Self::Select(label.trim());
        }
        if let Some(city) = trimmed.strip_prefix("/search ") {
            return Self::Search(city.trim());
        }
        match trimmed {
            "/search" => Self::Search(""),
            "/locate" => Self::Locate,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Input(line),
        }
    }
}

/// Shared wiring for every subcommand
struct App {
    config: WeatherMoodConfig,
    client: Arc<ProxyClient>,
    presenter: Arc<ConsolePresenter>,
    location: LocationCache,
}

impl App {
    fn new(config: WeatherMoodConfig) -> Result<Self> {
        let client = ProxyClient::new(&config.proxy).context("Failed to create proxy client")?;
        Ok(Self {
            config,
            client: Arc::new(client),
            presenter: Arc::new(ConsolePresenter::stdout()),
            location: LocationCache::new(),
        })
    }

    fn controller(&self) -> WeatherController {
        let geolocator = Geolocator::new(
            Arc::new(FixedPosition::from_config(&self.config.geolocation)),
            self.location.clone(),
            self.config.geolocation.timeout(),
        );
        WeatherController::new(
            self.client.clone(),
            self.presenter.clone(),
            geolocator,
            self.config.forecast.clone(),
        )
    }

    fn engine(&self) -> SuggestionEngine {
        SuggestionEngine::new(
            self.client.clone(),
            self.presenter.clone(),
            self.location.clone(),
            &self.config,
        )
    }

    async fn weather(&self, city: Option<String>, lat: Option<f64>, lon: Option<f64>) -> ExitCode {
        let controller = self.controller();
        let outcome = match (city, lat, lon) {
            (Some(city), _, _) => controller.search_city(&city).await,
            (None, Some(lat), Some(lon)) => controller.load_coordinates(lat, lon).await,
            _ => {
                self.presenter.notify_error("Give --city or both --lat and --lon");
                return ExitCode::FAILURE;
            }
        };
        if outcome.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }

    /// Resolve the ranking position through the geolocator, from `--near` or
    /// the configured position. No position leaves suggestions unranked.
    async fn locate_for_suggestions(&self, near: Option<&str>) -> Result<()> {
        let provider = match near {
            Some(text) => match UserLocation::parse(text) {
                Some(position) => FixedPosition(Some(position)),
                None => bail!("Invalid --near '{text}', expected <lat>,<lon>"),
            },
            None => FixedPosition::from_config(&self.config.geolocation),
        };

        let geolocator = Geolocator::new(
            Arc::new(provider),
            self.location.clone(),
            self.config.geolocation.timeout(),
        );
        if let Err(e) = geolocator.locate().await {
            debug!("Suggestions stay unranked: {}", e);
        }
        Ok(())
    }

    async fn suggest(&self, query: &str, near: Option<&str>) -> Result<ExitCode> {
        self.locate_for_suggestions(near).await?;

        let ranked = self.engine().lookup(query).await;
        if ranked.is_empty() {
            println!("No suggestions for '{}'", query.trim());
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn interactive(&self) -> Result<ExitCode> {
        let controller = self.controller();
        let mut engine = self.engine();

        if self.config.geolocation.locate_on_start {
            // Failures are silent here; suggestions just stay unranked
            let _ = controller.locate(LocateMode::Silent).await;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        {
            match InteractiveCommand::parse(&line) {
                InteractiveCommand::Quit => break,
                InteractiveCommand::Input(text) => {
                    engine.on_input(text);
                }
                InteractiveCommand::Search(city) => {
                    let _ = controller.search_city(city).await;
                }
                InteractiveCommand::Locate => {
                    let _ = controller.locate(LocateMode::UserInitiated).await;
                }
                InteractiveCommand::Select(choice) => {
                    let label = resolve_choice(&engine, choice);
                    match engine.commit_selection(&label) {
                        Some(place) => {
                            let _ = controller.select_place(&place).await;
                        }
                        None => self
                            .presenter
                            .notify_error(&format!("No suggestion matches '{choice}'")),
                    }
                }
            }
        }

        debug!("Interactive session finished");
        Ok(ExitCode::SUCCESS)
    }
}

/// Accept a 1-based row number as well as a full label
fn resolve_choice(engine: &SuggestionEngine, choice: &str) -> String {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| engine.current_candidates().get(index).map(|s| label_for(&s.candidate)))
        .unwrap_or_else(|| choice.to_string())
}

fn load_config(cli: &Cli) -> Result<WeatherMoodConfig> {
    let mut config = WeatherMoodConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    if let Some(url) = &cli.proxy_url {
        config.proxy.base_url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.logging, cli.verbose)?;
    info!("weather-mood {} using {}", weather_mood::VERSION, config.proxy.base_url);

    let app = App::new(config)?;
    match cli.command {
        Commands::Weather { city, lat, lon } => Ok(app.weather(city, lat, lon).await),
        Commands::Suggest { query, near } => app.suggest(&query, near.as_deref()).await,
        Commands::Interactive => app.interactive().await,
    }
}
