use std::fmt::Write;

use anyhow::{Context, Result};
use history::PredictionStore;
use model::PredictionRecord;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::storage::FileStorage;

pub fn show_history(config: &ClientConfig) {
    let store = PredictionStore::load(FileStorage::new(&config.history_file));
    debug!(
        "Read {} predictions from {}",
        store.len(),
        store.storage().path().display()
    );
    print!("{}", render_history(store.list()));
}

pub fn delete_prediction(config: &ClientConfig, index: usize) -> Result<()> {
    let mut store = PredictionStore::load(FileStorage::new(&config.history_file));

    let removed = store
        .remove_at(index)
        .with_context(|| format!("Failed to delete prediction at position {}", index))?;

    match removed {
        Some(record) => println!(
            "Deleted prediction from {} ({}%)",
            record.display_time(),
            record.cancellation_probability
        ),
        None => info!(
            "No prediction at position {}; history holds {}",
            index,
            store.len()
        ),
    }
    Ok(())
}

/// Table of records with their positions, newest first.
pub fn render_history(records: &[PredictionRecord]) -> String {
    if records.is_empty() {
        return "No predictions yet. Run `booking-predictor predict` to create one!\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<19}  {:>11}  {}", "#", "Prediction time", "Probability", "Risk");
    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<19}  {:>10}%  {}",
            index,
            record.display_time(),
            record.cancellation_probability,
            record.risk_level()
        );
    }
    out
}
