use model::BookingFeatures;
use serde::{Deserialize, Serialize};

use crate::service::TransportError;

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictRequest {
    pub features: BookingFeatures,
}

impl PredictRequest {
    pub fn new(features: BookingFeatures) -> Self {
        Self { features }
    }
}

/// Body returned by `POST /predict`, successful or not.
///
/// The service answers errors with a JSON `error` field, usually alongside an
/// HTTP 500, so the status code alone says nothing about the outcome.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PredictResponse {
    #[serde(default)]
    pub cancellation_probability: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
    /// Server-side timestamp. Not trusted, the client stamps its own.
    #[serde(default)]
    pub prediction_time: Option<String>,
}

/// What the service decided about a request that did reach it.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    /// Cancellation probability in percent.
    Probability(f64),
    /// The service refused the request; the message is shown verbatim.
    Rejected(String),
}

impl PredictResponse {
    /// Interpret the body. A non-empty `error` wins over any probability.
    pub fn into_reply(self) -> Result<ServiceReply, TransportError> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Ok(ServiceReply::Rejected(message));
        }
        match self.cancellation_probability {
            Some(p) if (0.0..=100.0).contains(&p) => Ok(ServiceReply::Probability(p)),
            Some(p) => Err(TransportError::Malformed(format!(
                "cancellation probability {} is outside 0..=100",
                p
            ))),
            None => Err(TransportError::Malformed(
                "response has neither cancellation_probability nor error".to_string(),
            )),
        }
    }
}

/// Decode a raw `/predict` response body.
pub fn decode_reply(body: &str) -> Result<ServiceReply, TransportError> {
    let response: PredictResponse = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Prediction response is not valid JSON: {}", e);
        TransportError::Malformed(format!("Failed to parse response: {}", e))
    })?;
    response.into_reply()
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}
