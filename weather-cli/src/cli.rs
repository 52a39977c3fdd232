use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::Password;
use tracing::info;
use weather_core::{Config, Session, WeatherProvider, provider_from_config};

use crate::{display, repl};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive menu (default).
    Run,

    /// Show current weather for a city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                run_interactive(provider).await
            }
            Command::Show { city } => {
                let city = city.trim();
                if city.is_empty() {
                    bail!("City name cannot be empty.");
                }

                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let record = provider.fetch_weather(city).await?;
                display::weather(&record);
                Ok(())
            }
            Command::Configure => configure(),
        }
    }
}

/// Run the menu until the user exits or presses Ctrl-C.
///
/// This is the only place an interrupt is handled.
async fn run_interactive<P: WeatherProvider>(provider: P) -> anyhow::Result<()> {
    let mut menu = repl::Repl::new(Session::new(provider));

    let outcome = tokio::select! {
        biased;
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            Err(repl::interrupted())
        }
        res = menu.run() => res,
    };

    match outcome {
        Ok(()) => {}
        Err(err) if repl::is_interrupt(&err) => {
            info!("interrupted by user");
            println!();
        }
        Err(err) => return Err(err),
    }

    display::goodbye();
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty.");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}
