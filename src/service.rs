use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use common::{
    HEALTH_PATH, HealthStatus, PREDICT_PATH, PredictRequest, PredictionService, ServiceReply,
    TransportError, decode_reply, endpoint_url,
};
use reqwest::Client;
use tracing::{debug, error, info, trace, warn};

use crate::config::ClientConfig;

/// Prediction service reached over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPredictionService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    /// Ask the service whether it is up and has its model loaded.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH);
        debug!("GET request to: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(HEALTH_PATH, e))?;

        if !response.status().is_success() {
            let error_msg = format!("HTTP error: {}", response.status());
            error!("GET {} - {}", HEALTH_PATH, error_msg);
            return Err(TransportError::Network(error_msg));
        }

        response.json::<HealthStatus>().await.map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            error!("GET {} - {}", HEALTH_PATH, error_msg);
            TransportError::Malformed(error_msg)
        })
    }

    fn transport_error(&self, endpoint: &str, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            error!("{} - timed out after {:?}", endpoint, self.timeout);
            TransportError::Timeout(self.timeout.as_millis() as u64)
        } else {
            error!("{} - request failed: {}", endpoint, error);
            TransportError::Network(error.to_string())
        }
    }
}

#[async_trait(?Send)]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictRequest) -> Result<ServiceReply, TransportError> {
        let url = endpoint_url(&self.base_url, PREDICT_PATH);
        debug!("POST request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(PREDICT_PATH, e))?;

        // Errors come back as JSON with a 500, so the body is read regardless.
        let status = response.status();
        if !status.is_success() {
            warn!("POST {} - Non-OK response: {}", PREDICT_PATH, status);
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(PREDICT_PATH, e))?;
        trace!("POST {} - Response received, parsing JSON", PREDICT_PATH);

        let reply = decode_reply(&body).map_err(|e| match e {
            TransportError::Malformed(reason) if !status.is_success() => {
                TransportError::Malformed(format!("HTTP {}: {}", status, reason))
            }
            other => other,
        })?;

        info!("POST {} - Success", PREDICT_PATH);
        Ok(reply)
    }
}
