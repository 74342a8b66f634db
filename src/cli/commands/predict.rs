use anyhow::{Result, anyhow};
use common::PredictionService;
use history::{KeyValueStorage, PredictionStore};
use model::FeatureName;
use session::{FormSession, SubmitOutcome};
use tracing::{debug, info, trace};

use crate::config::ClientConfig;
use crate::service::HttpPredictionService;
use crate::storage::FileStorage;

pub async fn predict(config: &ClientConfig, assignments: Vec<(FeatureName, String)>) -> Result<()> {
    trace!("Entering predict command");
    debug!("Prediction service: {}", config.api_url);
    debug!("History file: {}", config.history_file.display());

    let service = HttpPredictionService::from_config(config)?;
    let mut store = PredictionStore::load(FileStorage::new(&config.history_file));

    let outcome = submit_features(&service, &mut store, assignments).await;
    if outcome.is_success() {
        println!("{}", outcome.message());
        info!("History holds {} predictions", store.len());
        Ok(())
    } else {
        Err(anyhow!(outcome.message()))
    }
}

/// Fill a fresh form with `assignments` and submit it.
pub async fn submit_features<S, K>(
    service: &S,
    store: &mut PredictionStore<K>,
    assignments: Vec<(FeatureName, String)>,
) -> SubmitOutcome
where
    S: PredictionService + ?Sized,
    K: KeyValueStorage,
{
    let mut session = FormSession::new();
    for (name, value) in assignments {
        session.set_field(name, value);
    }
    session.submit(service, store).await
}
