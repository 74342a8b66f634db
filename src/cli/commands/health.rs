use anyhow::{Result, bail};
use tracing::debug;

use crate::config::ClientConfig;
use crate::service::HttpPredictionService;

pub async fn check_health(config: &ClientConfig) -> Result<()> {
    debug!("Checking prediction service at {}", config.api_url);
    let service = HttpPredictionService::from_config(config)?;

    let health = match service.health().await {
        Ok(health) => health,
        Err(e) => bail!("Prediction service unreachable: {}", e),
    };

    println!(
        "status: {}, model loaded: {}",
        health.status,
        if health.model_loaded { "yes" } else { "no" }
    );
    if !health.is_ready() {
        bail!("Prediction service is not ready");
    }
    Ok(())
}
