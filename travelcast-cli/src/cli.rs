use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::Password;
use travelcast_core::{Config, advise, fetch_report, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travelcast", version, about = "Weather report and packing advice for a city")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure {
        /// Key to store; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show current weather, advice and the 7-day forecast for a city.
    Show {
        /// City name, e.g. "Lisbon" or "Paris,FR".
        city: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print packing advice for a description and temperature without querying anything.
    Advice {
        #[arg(long)]
        description: String,

        /// Temperature in °C.
        #[arg(long, allow_hyphen_values = true)]
        temp: i32,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { city, json } => show(&city, json).await,
            Command::Advice { description, temp } => {
                println!("{}", advise(&description, temp));
                Ok(())
            }
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    config.set_api_key(api_key);
    config.api_key()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        bail!("Please enter a valid city name.");
    }

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let report = fetch_report(provider.as_ref(), city).await?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print!("{}", render::report(&report, provider.as_ref())?);
    }

    Ok(())
}
