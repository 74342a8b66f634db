use chrono::{Local, NaiveDateTime};
use common::{PredictRequest, PredictionService, ServiceReply, TransportError};
use history::{KeyValueStorage, PredictionStore};
use model::{BookingFeatures, FeatureName, FieldValues, PredictionRecord};
use tracing::{debug, error, info, trace, warn};

use crate::outcome::SubmitOutcome;

type Clock = Box<dyn Fn() -> NaiveDateTime>;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse `values`, send them to `service` and turn the answer into an outcome.
///
/// The record, if any, is stamped with `now()` when the answer arrives. This
/// neither stores the record nor clears the form; [`FormSession::submit`]
/// does both.
pub async fn request_prediction<S, F>(service: &S, values: &FieldValues, now: F) -> SubmitOutcome
where
    S: PredictionService + ?Sized,
    F: FnOnce() -> NaiveDateTime,
{
    let features = match BookingFeatures::try_from(values) {
        Ok(features) => features,
        Err(e) => {
            warn!("Not sending prediction request: {}", e);
            return SubmitOutcome::Invalid(e);
        }
    };

    trace!("Sending prediction request");
    match service.predict(&PredictRequest::new(features)).await {
        Ok(ServiceReply::Probability(probability)) => {
            match PredictionRecord::new(now(), probability) {
                Ok(record) => {
                    info!("Service predicted {}% cancellation probability", probability);
                    SubmitOutcome::Recorded(record)
                }
                Err(e) => {
                    error!("Service returned an unusable probability: {}", e);
                    SubmitOutcome::Failed(TransportError::Malformed(e.to_string()))
                }
            }
        }
        Ok(ServiceReply::Rejected(message)) => {
            warn!("Service rejected prediction request: {}", message);
            SubmitOutcome::Rejected(message)
        }
        Err(e) => {
            error!("Prediction request failed: {}", e);
            SubmitOutcome::Failed(e)
        }
    }
}

/// Transient edit state of the booking form.
///
/// Values are accepted as typed; they are only checked when submitted. Every
/// submission clears the form, whatever its outcome.
pub struct FormSession {
    values: FieldValues,
    clock: Clock,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_clock(local_now)
    }

    /// Session that stamps records with `clock` instead of local time.
    pub fn with_clock(clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        Self {
            values: FieldValues::new(),
            clock: Box::new(clock),
        }
    }

    pub fn set_field(&mut self, name: FeatureName, value: impl Into<String>) {
        let value = value.into();
        trace!("Setting {} to {:?}", name, value);
        self.values.set(name, value);
    }

    pub fn field(&self, name: FeatureName) -> &str {
        self.values.get(name)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn is_blank(&self) -> bool {
        self.values.is_blank()
    }

    pub fn reset(&mut self) {
        debug!("Clearing booking form");
        self.values.clear();
    }

    /// Submit the current values and record a successful prediction in `store`.
    pub async fn submit<S, K>(&mut self, service: &S, store: &mut PredictionStore<K>) -> SubmitOutcome
    where
        S: PredictionService + ?Sized,
        K: KeyValueStorage,
    {
        let outcome = request_prediction(service, &self.values, || (self.clock)()).await;
        self.reset();
        store_outcome(outcome, store)
    }
}

/// Append the record of a successful outcome to `store`.
///
/// A record that cannot be persisted turns the outcome into
/// [`SubmitOutcome::Unsaved`]; every other outcome passes through untouched.
pub fn store_outcome<K: KeyValueStorage>(
    outcome: SubmitOutcome,
    store: &mut PredictionStore<K>,
) -> SubmitOutcome {
    match outcome {
        SubmitOutcome::Recorded(record) => match store.append(record.clone()) {
            Ok(()) => SubmitOutcome::Recorded(record),
            Err(e) => {
                error!("Could not save prediction: {}", e);
                SubmitOutcome::Unsaved {
                    record,
                    reason: e.to_string(),
                }
            }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use history::MemoryStorage;
    use model::RiskLevel;
    use std::cell::RefCell;

    struct ScriptedService {
        reply: Result<ServiceReply, TransportError>,
        requests: RefCell<Vec<PredictRequest>>,
    }

    impl ScriptedService {
        fn answering(reply: Result<ServiceReply, TransportError>) -> Self {
            Self {
                reply,
                requests: RefCell::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl PredictionService for ScriptedService {
        async fn predict(&self, request: &PredictRequest) -> Result<ServiceReply, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.reply.clone()
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn filled_session() -> FormSession {
        let mut session = FormSession::with_clock(noon);
        session.set_field(FeatureName::Hotel, "City");
        session.set_field(FeatureName::LeadTime, "45");
        session.set_field(FeatureName::Adults, "2");
        session.set_field(FeatureName::Meal, "BB");
        session
    }

    #[tokio::test]
    async fn test_success_records_at_front_and_clears_form() {
        let service = ScriptedService::answering(Ok(ServiceReply::Probability(82.0)));
        let mut store = PredictionStore::load(MemoryStorage::new());
        store
            .append(PredictionRecord::new(noon(), 10.0).unwrap())
            .unwrap();
        let mut session = filled_session();

        let outcome = session.submit(&service, &mut store).await;

        let expected = PredictionRecord::new(noon(), 82.0).unwrap();
        assert_eq!(outcome, SubmitOutcome::Recorded(expected.clone()));
        assert!(outcome.is_success());
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], expected);
        assert_eq!(store.list()[0].risk_level(), RiskLevel::High);
        assert!(session.is_blank());

        let requests = service.requests.borrow();
        let sent = &requests[0];
        assert_eq!(sent.features.lead_time, Some(45));
        assert_eq!(sent.features.children, None);
    }

    #[tokio::test]
    async fn test_service_error_is_surfaced_verbatim() {
        let service = ScriptedService::answering(Ok(ServiceReply::Rejected(
            "model unavailable".to_string(),
        )));
        let mut store = PredictionStore::load(MemoryStorage::new());
        let mut session = filled_session();

        let outcome = session.submit(&service, &mut store).await;

        assert_eq!(outcome, SubmitOutcome::Rejected("model unavailable".to_string()));
        assert_eq!(outcome.message(), "Prediction failed: model unavailable");
        assert!(store.is_empty());
        assert!(session.is_blank());
    }

    #[tokio::test]
    async fn test_transport_failure_reports_generic_message() {
        let service = ScriptedService::answering(Err(TransportError::Network(
            "connection refused".to_string(),
        )));
        let mut store = PredictionStore::load(MemoryStorage::new());
        let mut session = filled_session();

        let outcome = session.submit(&service, &mut store).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(TransportError::Network(_))));
        assert!(!outcome.message().contains("connection refused"));
        assert!(outcome.record().is_none());
        assert!(store.is_empty());
        assert!(session.is_blank());
    }

    #[tokio::test]
    async fn test_invalid_field_is_not_sent() {
        let service = ScriptedService::answering(Ok(ServiceReply::Probability(50.0)));
        let mut store = PredictionStore::load(MemoryStorage::new());
        let mut session = filled_session();
        session.set_field(FeatureName::Children, "a few");

        let outcome = session.submit(&service, &mut store).await;

        match &outcome {
            SubmitOutcome::Invalid(e) => assert_eq!(e.field, FeatureName::Children),
            other => panic!("expected invalid outcome, got {:?}", other),
        }
        assert_eq!(service.request_count(), 0);
        assert!(store.is_empty());
        assert!(session.is_blank());
    }

    #[tokio::test]
    async fn test_blank_form_is_still_submitted() {
        let service = ScriptedService::answering(Ok(ServiceReply::Probability(30.0)));
        let mut store = PredictionStore::load(MemoryStorage::new());
        let mut session = FormSession::with_clock(noon);

        let outcome = session.submit(&service, &mut store).await;

        assert!(outcome.is_success());
        assert_eq!(service.request_count(), 1);
        assert_eq!(store.list()[0].risk_level(), RiskLevel::Low);
    }

    #[tokio::test]
    async fn test_repeated_submissions_stack_newest_first() {
        let mut store = PredictionStore::load(MemoryStorage::new());
        let mut session = FormSession::with_clock(noon);

        for probability in [15.0, 55.0, 95.0] {
            let service = ScriptedService::answering(Ok(ServiceReply::Probability(probability)));
            session.set_field(FeatureName::Hotel, "Resort");
            session.submit(&service, &mut store).await;
        }

        let probabilities: Vec<f64> = store
            .list()
            .iter()
            .map(|r| r.cancellation_probability)
            .collect();
        assert_eq!(probabilities, vec![95.0, 55.0, 15.0]);
    }

    #[tokio::test]
    async fn test_request_prediction_leaves_values_alone() {
        let service = ScriptedService::answering(Ok(ServiceReply::Probability(70.0)));
        let session = filled_session();

        let outcome = request_prediction(&service, session.values(), noon).await;

        assert_eq!(outcome.record().map(|r| r.risk_level()), Some(RiskLevel::Medium));
        assert_eq!(session.field(FeatureName::Hotel), "City");
    }

    #[test]
    fn test_set_field_touches_one_field() {
        let mut session = FormSession::new();
        session.set_field(FeatureName::Agent, "9");
        session.set_field(FeatureName::Agent, "240");

        assert_eq!(session.field(FeatureName::Agent), "240");
        assert!(
            FeatureName::ALL
                .into_iter()
                .filter(|name| *name != FeatureName::Agent)
                .all(|name| session.field(name).is_empty())
        );

        session.reset();
        assert!(session.is_blank());
    }

    #[test]
    fn test_store_outcome_only_appends_records() {
        let mut store = PredictionStore::load(MemoryStorage::new());

        let rejected = store_outcome(SubmitOutcome::Rejected("nope".to_string()), &mut store);
        assert_eq!(rejected, SubmitOutcome::Rejected("nope".to_string()));
        assert!(store.is_empty());

        let record = PredictionRecord::new(noon(), 44.0).unwrap();
        let recorded = store_outcome(SubmitOutcome::Recorded(record.clone()), &mut store);
        assert_eq!(recorded, SubmitOutcome::Recorded(record.clone()));
        assert_eq!(store.list(), &[record]);
    }
}
