//! Transport-layer types shared by the terminal and browser clients.
//! These mirror the prediction service's request/response payloads so both
//! shells talk to it the same way.

mod service;
mod wire;

pub use service::{PredictionService, TransportError};
pub use wire::{HealthStatus, PredictRequest, PredictResponse, ServiceReply, decode_reply};

/// Path of the prediction endpoint, relative to the service base URL.
pub const PREDICT_PATH: &str = "/predict";

/// Path of the service health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Join the configured base URL and an endpoint path.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:5000", PREDICT_PATH),
            "http://localhost:5000/predict"
        );
        assert_eq!(
            endpoint_url("https://predictor.example.com/", HEALTH_PATH),
            "https://predictor.example.com/health"
        );
    }
}
