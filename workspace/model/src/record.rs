use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Probability outside the 0–100 percent range, or not a number at all.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("cancellation probability {0} is outside 0..=100")]
pub struct InvalidProbability(pub f64);

/// One stored prediction outcome.
///
/// `prediction_time` is the client's local wall-clock time at the moment the
/// service answered. The serialized form is the persisted history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct PredictionRecord {
    pub prediction_time: NaiveDateTime,
    /// Percentage in `0.0..=100.0`.
    pub cancellation_probability: f64,
}

/// Persisted shape of a record before its probability is range checked.
#[derive(Deserialize)]
struct StoredRecord {
    prediction_time: NaiveDateTime,
    cancellation_probability: f64,
}

impl TryFrom<StoredRecord> for PredictionRecord {
    type Error = InvalidProbability;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        PredictionRecord::new(stored.prediction_time, stored.cancellation_probability)
    }
}

impl PredictionRecord {
    pub fn new(
        prediction_time: NaiveDateTime,
        cancellation_probability: f64,
    ) -> Result<Self, InvalidProbability> {
        if !(0.0..=100.0).contains(&cancellation_probability) {
            return Err(InvalidProbability(cancellation_probability));
        }
        Ok(Self {
            prediction_time,
            cancellation_probability,
        })
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.cancellation_probability)
    }

    /// Timestamp formatted for history listings.
    pub fn display_time(&self) -> String {
        self.prediction_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Display band for a cancellation probability. Derived on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `p <= 30` is low, `30 < p <= 70` is medium, anything above is high.
    pub fn classify(probability: f64) -> Self {
        if probability <= 30.0 {
            RiskLevel::Low
        } else if probability <= 70.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
