use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use model::FeatureName;

pub mod commands;

use commands::{check_health, delete_prediction, list_fields, predict, show_history};

use crate::config::ClientConfig;

#[derive(Parser)]
#[command(name = "booking-predictor")]
#[command(about = "Hotel booking cancellation predictions with a local history")]
#[command(version)]
pub struct Cli {
    /// Base URL of the prediction service
    ///
    /// Overrides PREDICTOR_API_URL and the settings file.
    /// Example: http://localhost:5000
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// File holding the prediction history
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Seconds to wait for the prediction service before giving up
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in booking features and request a cancellation prediction
    ///
    /// Fields left out are sent empty. Run `fields` to see every name.
    ///
    /// Example:
    ///   booking-predictor predict -f hotel=City -f lead_time=45 -f adults=2
    Predict {
        /// Booking feature as NAME=VALUE (repeatable)
        #[arg(short = 'f', long = "feature", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        features: Vec<(FeatureName, String)>,
    },
    /// List stored predictions, newest first
    History,
    /// Delete the stored prediction at a position shown by `history`
    Delete {
        /// Zero-based position, newest first
        index: usize,
    },
    /// List every booking feature and the values it accepts
    Fields,
    /// Check whether the prediction service is up and has its model loaded
    Health,
}

/// Parse a `NAME=VALUE` feature assignment. The value may be empty.
fn parse_assignment(raw: &str) -> Result<(FeatureName, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))?;
    let name = name.trim().parse::<FeatureName>().map_err(|e| e.to_string())?;
    Ok((name, value.to_string()))
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = ClientConfig::load()?.with_overrides(
            self.api_url,
            self.history_file,
            self.timeout_secs,
        )?;

        match self.command {
            Commands::Predict { features } => {
                predict(&config, features).await?;
            }
            Commands::History => {
                show_history(&config);
            }
            Commands::Delete { index } => {
                delete_prediction(&config, index)?;
            }
            Commands::Fields => {
                list_fields();
            }
            Commands::Health => {
                check_health(&config).await?;
            }
        }
        Ok(())
    }
}
