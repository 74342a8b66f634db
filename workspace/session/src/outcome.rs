use common::TransportError;
use model::{InvalidFeature, PredictionRecord};

/// Result of one submission attempt, as reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The service answered and the record was stored.
    Recorded(PredictionRecord),
    /// The service answered but the history could not be written.
    Unsaved {
        record: PredictionRecord,
        reason: String,
    },
    /// The service refused the request with its own message.
    Rejected(String),
    /// No usable answer: network trouble, timeout or a malformed body.
    Failed(TransportError),
    /// A field did not parse; nothing was sent.
    Invalid(InvalidFeature),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Recorded(_))
    }

    /// The record produced by the service, stored or not.
    pub fn record(&self) -> Option<&PredictionRecord> {
        match self {
            SubmitOutcome::Recorded(record) | SubmitOutcome::Unsaved { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Message for the user.
    ///
    /// Transport failures get a generic text; the underlying error only goes
    /// to the log.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Recorded(record) => format!(
                "Prediction saved! Cancellation probability: {}% ({} risk)",
                record.cancellation_probability,
                record.risk_level()
            ),
            SubmitOutcome::Unsaved { reason, .. } => {
                format!("Prediction received but could not be saved: {}", reason)
            }
            SubmitOutcome::Rejected(message) => format!("Prediction failed: {}", message),
            SubmitOutcome::Failed(_) => "Prediction failed. Please try again later.".to_string(),
            SubmitOutcome::Invalid(error) => format!("Prediction not sent: {}", error),
        }
    }
}
