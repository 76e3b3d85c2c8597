use anyhow::Context;
use clap::{Parser, Subcommand};
use qweather_core::{Config, WeatherReporter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "qweather", version, about = "QWeather lookups from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the QWeather API key in the local config file.
    Configure,

    /// Show realtime weather for a city.
    Now {
        /// City name, e.g. "北京".
        city: String,
    },

    /// Show active weather warnings for a city.
    Alerts {
        /// City name, e.g. "北京".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Now { city } => {
                let reporter = reporter()?;
                println!("{}", reporter.realtime_weather(&city).await);
                Ok(())
            }
            Command::Alerts { city } => {
                let reporter = reporter()?;
                println!("{}", reporter.weather_warnings(&city).await);
                Ok(())
            }
        }
    }
}

/// Prompt for the API key and persist it.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("QWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key from prompt")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Reporter over the production client; errors out before any request
/// when no key is configured.
fn reporter() -> anyhow::Result<WeatherReporter> {
    let config = Config::load()?;
    WeatherReporter::from_config(&config)
}
