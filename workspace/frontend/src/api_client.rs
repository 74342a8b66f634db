use async_trait::async_trait;
use common::{
    HEALTH_PATH, HealthStatus, PREDICT_PATH, PredictRequest, PredictionService, ServiceReply,
    TransportError, decode_reply, endpoint_url,
};
use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::settings;

/// Prediction service reached over `fetch`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooPredictionService {
    base_url: String,
    timeout_ms: u32,
}

impl GlooPredictionService {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_settings() -> Self {
        let settings = settings::get_settings();
        Self::new(settings.api_url, settings.request_timeout_ms)
    }

    /// Ask the service whether it is up and has a model loaded.
    pub async fn health(&self) -> Result<HealthStatus, TransportError> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH);
        log::debug!("GET request to: {}", url);

        let response = self.with_timeout(Request::get(&url).send()).await?;
        response.json::<HealthStatus>().await.map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("GET {} - {}", HEALTH_PATH, error_msg);
            TransportError::Malformed(error_msg)
        })
    }

    /// Race `request` against the configured timeout.
    async fn with_timeout<F>(&self, request: F) -> Result<gloo_net::http::Response, TransportError>
    where
        F: std::future::Future<Output = Result<gloo_net::http::Response, gloo_net::Error>>,
    {
        let request = Box::pin(request);
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match select(request, timeout).await {
            Either::Left((Ok(response), _)) => Ok(response),
            Either::Left((Err(e), _)) => {
                log::error!("Request failed: {}", e);
                Err(TransportError::Network(e.to_string()))
            }
            Either::Right(((), _)) => {
                log::error!("Request timed out after {} ms", self.timeout_ms);
                Err(TransportError::Timeout(u64::from(self.timeout_ms)))
            }
        }
    }
}

#[async_trait(?Send)]
impl PredictionService for GlooPredictionService {
    async fn predict(&self, request: &PredictRequest) -> Result<ServiceReply, TransportError> {
        let url = endpoint_url(&self.base_url, PREDICT_PATH);
        log::debug!("POST request to: {}", url);

        let request = Request::post(&url).json(request).map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", PREDICT_PATH, error_msg);
            TransportError::Network(error_msg)
        })?;

        let response = self.with_timeout(request.send()).await?;
        let status = response.status();

        // Errors come back as JSON with a non-2xx status, so the body decides
        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("POST {} - {}", PREDICT_PATH, error_msg);
            TransportError::Network(error_msg)
        })?;

        log::trace!("POST {} - HTTP {} response received, parsing JSON", PREDICT_PATH, status);
        match decode_reply(&body) {
            Err(TransportError::Malformed(reason)) if !response.ok() => {
                Err(TransportError::Malformed(format!("HTTP {}: {}", status, reason)))
            }
            reply => reply,
        }
    }
}
