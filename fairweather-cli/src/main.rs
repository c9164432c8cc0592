use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fairweather_core::{
    ActivityProfile, ActivityRegistry, ForecastStep, TimeWindow, assess_activity_risk,
    assess_basic, assess_with_forecast, best_time_windows, forecast_outlook,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "fairweather",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FAIRWEATHER_BUILD_SHA"), ")"),
    about = "Activity risk assessment for weather readings"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the activity catalog
    Activities,

    /// Assess a reading for an activity
    Assess {
        /// Reading JSON file
        #[arg(long)]
        reading: PathBuf,

        /// Activity id (default: preferred_activity from config)
        #[arg(long)]
        activity: Option<String>,

        /// Optional forecast JSON to attach best time windows
        #[arg(long)]
        forecast: Option<PathBuf>,

        /// Number of forecast windows (default: from config)
        #[arg(long)]
        windows: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Threshold assessment from user preferences only
    Basic {
        /// Reading JSON file
        #[arg(long)]
        reading: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Rate every forecast step and rank the best windows for an activity
    Windows {
        /// Forecast JSON file
        #[arg(long)]
        forecast: PathBuf,

        /// Activity id (default: preferred_activity from config)
        #[arg(long)]
        activity: Option<String>,

        /// Maximum windows to print (default: from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.fairweather/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Serialize)]
struct ForecastReport<'a> {
    outlook: &'a [ForecastStep],
    windows: &'a [TimeWindow],
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Activities => {
            let cfg = config::load_config()?;
            let registry = config::load_registry(&cfg)?;
            render::print_activities(&registry);
        }

        Command::Assess {
            reading,
            activity,
            forecast,
            windows,
            json,
        } => {
            let cfg = config::load_config()?;
            let registry = config::load_registry(&cfg)?;
            let profile = select_profile(&registry, &cfg, activity.as_deref());
            let reading = input::load_reading(&reading)?;

            let assessment = match forecast {
                Some(path) => {
                    let entries = input::load_forecast(&path)?;
                    let limit = windows.unwrap_or(cfg.output.windows);
                    assess_with_forecast(&reading, &entries, profile, limit)
                }
                None => assess_activity_risk(&reading, profile),
            };

            info!(activity = %profile.id, score = assessment.score, "assessment complete");
            if json || cfg.output.json {
                print_json(&assessment)?;
            } else {
                render::print_assessment(&assessment, profile);
            }
        }

        Command::Basic { reading, json } => {
            let cfg = config::load_config()?;
            let reading = input::load_reading(&reading)?;
            let assessment = assess_basic(&reading, &cfg.preferences);

            if json || cfg.output.json {
                print_json(&assessment)?;
            } else {
                render::print_basic(&assessment);
            }
        }

        Command::Windows {
            forecast,
            activity,
            limit,
            json,
        } => {
            let cfg = config::load_config()?;
            let registry = config::load_registry(&cfg)?;
            let profile = select_profile(&registry, &cfg, activity.as_deref());
            let entries = input::load_forecast(&forecast)?;
            let outlook = forecast_outlook(&entries, profile);
            let windows =
                best_time_windows(&entries, profile, limit.unwrap_or(cfg.output.windows));

            info!(
                activity = %profile.id,
                entries = entries.len(),
                windows = windows.len(),
                "forecast ranked"
            );
            if json || cfg.output.json {
                print_json(&ForecastReport {
                    outlook: &outlook,
                    windows: &windows,
                })?;
            } else {
                println!("# Forecast for {}\n", profile.name);
                render::print_outlook(&outlook);
                println!("\n## Best windows\n");
                render::print_windows(&windows);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                let s = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("{}", s.trim_end());
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn select_profile<'a>(
    registry: &'a ActivityRegistry,
    cfg: &Config,
    requested: Option<&str>,
) -> &'a ActivityProfile {
    let id = requested.unwrap_or(&cfg.preferences.preferred_activity);
    if registry.find(id).is_none() {
        warn!(id, fallback = %registry.get_by_id(id).id, "unknown activity, using fallback");
    }
    registry.get_by_id(id)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{}", s);
    Ok(())
}
