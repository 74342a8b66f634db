use async_trait::async_trait;
use thiserror::Error;

use crate::wire::{PredictRequest, ServiceReply};

/// A request that never produced a usable service decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection broke.
    #[error("Request failed: {0}")]
    Network(String),

    /// No answer within the configured timeout.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// An answer arrived but it is not a prediction response.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// The external classifier that turns booking features into a probability.
///
/// Implementations exist for the terminal client (reqwest) and the browser
/// client (gloo-net). Futures are not required to be `Send` because the
/// browser runtime is single threaded.
#[async_trait(?Send)]
pub trait PredictionService {
    async fn predict(&self, request: &PredictRequest) -> Result<ServiceReply, TransportError>;
}
