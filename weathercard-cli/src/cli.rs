use std::{io::IsTerminal, sync::Arc};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Text, validator::Validation};
use weathercard_core::{
    CityQuery, Config, Coordinates, DisplayModel, FixedLocation, Geolocator, IpGeolocator,
    OpenWeatherClient, Presenter, Startup,
};

use crate::render::{self, StderrNotifier};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathercard", version, about = "Current weather as a card")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Position override shared by the commands that start from a location.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct PositionArgs {
    /// Latitude in degrees; requires --lon.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees; requires --lat.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and endpoint settings.
    Configure {
        /// OpenWeather API key; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,

        /// API base URL, e.g. "https://api.openweathermap.org/data/2.5/".
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show the weather once, for a city or for the current position.
    Show {
        /// City name; when absent the current position is used.
        city: Option<String>,

        #[command(flatten)]
        position: PositionArgs,

        /// Print the card as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start from the current position, then keep asking for cities until Esc.
    Screen {
        #[command(flatten)]
        position: PositionArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key, base_url } => configure(api_key, base_url),
            Command::Show { city, position, json } => show(city, position, json).await,
            Command::Screen { position } => screen(position).await,
        }
    }
}

fn configure(api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;
    let interactive = api_key.is_none() && base_url.is_none();

    let api_key = match api_key {
        Some(key) => Some(key),
        None if interactive => {
            let mut prompt = Text::new("OpenWeather API key:");
            if let Some(existing) = cfg.api_key.as_deref() {
                prompt = prompt.with_default(existing);
            }
            Some(prompt.prompt().context("Failed to read API key")?)
        }
        None => None,
    };
    if let Some(key) = api_key {
        let key = key.trim().to_string();
        if key.is_empty() {
            bail!("API key must not be empty");
        }
        cfg.set_api_key(key);
    }

    let base_url = match base_url {
        Some(url) => Some(url),
        None if interactive => Some(
            Text::new("API base URL:")
                .with_default(&cfg.base_url)
                .prompt()
                .context("Failed to read base URL")?,
        ),
        None => None,
    };
    if let Some(url) = base_url {
        cfg.base_url = url.trim().to_string();
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, position: PositionArgs, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let presenter = presenter(&cfg)?;

    let model = match city {
        Some(city) => presenter.submit_city(&city).await?,
        None => match presenter.start(geolocator(&cfg, position).as_ref()).await? {
            Startup::Shown(model) => model,
            Startup::NeedsCity(reason) => {
                if !std::io::stdin().is_terminal() {
                    bail!("{reason}. Pass a city name instead.");
                }
                let Some(city) = prompt_city()? else {
                    return Ok(());
                };
                presenter.submit_city(&city).await?
            }
        },
    };

    print_model(&model, json)
}

async fn screen(position: PositionArgs) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let presenter = presenter(&cfg)?;

    match presenter.start(geolocator(&cfg, position).as_ref()).await {
        Ok(Startup::Shown(model)) => print_model(&model, false)?,
        Ok(Startup::NeedsCity(_)) => println!("Location unavailable, enter a city instead."),
        // Already reported through the notifier.
        Err(e) => tracing::debug!("Startup fetch failed: {}", e),
    }

    while let Some(city) = prompt_city()? {
        if presenter.submit_city(&city).await.is_err() {
            continue;
        }
        if let Some(model) = presenter.current() {
            print_model(&model, false)?;
        }
    }

    Ok(())
}

fn presenter(cfg: &Config) -> anyhow::Result<Presenter> {
    let client = OpenWeatherClient::new(cfg.api()?);
    Ok(Presenter::new(
        Arc::new(client),
        Arc::new(StderrNotifier),
        cfg.clock_correction_secs,
    ))
}

/// Explicit flags first, then configured coordinates, then the IP lookup.
fn geolocator(cfg: &Config, position: PositionArgs) -> Box<dyn Geolocator> {
    let explicit = match (position.lat, position.lon) {
        (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
        _ => None,
    };

    match explicit.or_else(|| cfg.fixed_location()) {
        Some(coords) => Box::new(FixedLocation(coords)),
        None => Box::new(IpGeolocator::new(cfg.geolocation_url.clone())),
    }
}

/// Ask for a city with inline validation. `None` when the user cancels.
fn prompt_city() -> anyhow::Result<Option<String>> {
    let answer = Text::new("City:")
        .with_help_message("Esc to quit")
        .with_validator(|input: &str| {
            Ok(match CityQuery::parse(input) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt();

    match answer {
        Ok(city) => Ok(Some(city)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city"),
    }
}

fn print_model(model: &DisplayModel, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(model).context("Failed to serialize weather card")?
        );
    } else {
        println!("{}", render::card(model));
    }
    Ok(())
}
