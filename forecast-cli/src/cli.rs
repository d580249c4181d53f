use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use forecast_core::{
    Config, Dashboard, DashboardOptions, ForecastRequest, facts::ClockIndex, source_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast dashboard")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// How the hourly section is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum HourlyView {
    /// One line per hour.
    #[default]
    Timeline,
    /// Hours grouped under a heading per day.
    Grid,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure {
        /// Always display times at this UTC offset, in seconds.
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },

    /// Show the forecast dashboard for a location.
    Show {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true, required_unless_present = "file")]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true, required_unless_present = "file")]
        lon: Option<f64>,

        /// Name printed in the header.
        #[arg(long)]
        name: Option<String>,

        /// Read a saved One Call payload instead of calling the API.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Display times at this UTC offset, in seconds.
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,

        #[arg(long, value_enum, default_value_t = HourlyView::Timeline)]
        view: HourlyView,

        /// Number of hourly entries to show.
        #[arg(long)]
        hours: Option<usize>,

        /// Print the normalized dashboard as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { utc_offset } => configure(utc_offset)?,
            Command::Show {
                lat,
                lon,
                name,
                file,
                utc_offset,
                view,
                hours,
                json,
            } => {
                let config = Config::load()?;
                let source = source_from_config(&config, file)?;
                // Coordinates are only optional when reading a saved payload.
                let (lat, lon) = (lat.unwrap_or_default(), lon.unwrap_or_default());
                let request = ForecastRequest::new(lat, lon)
                    .with_units(config.display.units.clone());

                let payload = source.fetch(&request).await?;
                tracing::info!(timezone = %payload.timezone, "forecast loaded");

                let opts = DashboardOptions {
                    ctx: config.time_context(utc_offset, payload.timezone_offset)?,
                    missing_window: config.display.missing_window,
                    hourly_limit: hours,
                    progress_window: config.display.progress_window,
                };
                let dashboard = Dashboard::build(&payload, &opts);

                if json {
                    let out = serde_json::to_string_pretty(&dashboard)
                        .context("Failed to serialize dashboard")?;
                    println!("{out}");
                    return Ok(());
                }

                let title = name.unwrap_or_else(|| {
                    if payload.timezone.is_empty() {
                        format!("{:.2}, {:.2}", payload.lat, payload.lon)
                    } else {
                        payload.timezone.clone()
                    }
                });

                let page = render::dashboard(
                    &dashboard,
                    &render::RenderOptions {
                        title: &title,
                        view,
                        now: Utc::now().timestamp(),
                        ctx: opts.ctx,
                        units: &config.display.units,
                    },
                    &mut ClockIndex,
                );
                print!("{page}");
            }
        }

        Ok(())
    }
}

fn configure(utc_offset: Option<i32>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    if let Some(offset) = utc_offset {
        // Validate before persisting.
        config.time_context(Some(offset), 0)?;
        config.display.utc_offset_seconds = Some(offset);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
