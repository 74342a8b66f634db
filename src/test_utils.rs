#[cfg(test)]
pub mod test_utils {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// How the stub prediction service answers `POST /predict`.
    #[derive(Debug, Clone)]
    pub enum StubReply {
        /// 200 with a probability and a server timestamp.
        Probability(f64),
        /// 500 with `{"error": message}`.
        Error(String),
        /// 502 with an HTML body.
        Garbage,
        /// Wait, then answer with a probability.
        Slow(Duration, f64),
    }

    #[derive(Clone)]
    struct StubState {
        reply: StubReply,
        model_loaded: bool,
        requests: Arc<Mutex<Vec<Value>>>,
    }

    /// A prediction service stand-in listening on an ephemeral local port.
    pub struct StubService {
        pub base_url: String,
        requests: Arc<Mutex<Vec<Value>>>,
        server: tokio::task::JoinHandle<()>,
        // Test output stays on for as long as the stub is alive
        _tracing: tracing::subscriber::DefaultGuard,
    }

    impl StubService {
        /// JSON bodies received on `/predict`, oldest first.
        pub fn requests(&self) -> Vec<Value> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Drop for StubService {
        fn drop(&mut self) {
            self.server.abort();
        }
    }

    async fn predict(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
        state.requests.lock().unwrap().push(body);

        match state.reply {
            StubReply::Probability(p) => Json(json!({
                "cancellation_probability": p,
                "prediction_time": "2001-01-01T00:00:00"
            }))
            .into_response(),
            StubReply::Error(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            StubReply::Garbage => (
                StatusCode::BAD_GATEWAY,
                "<html><body>Bad Gateway</body></html>",
            )
                .into_response(),
            StubReply::Slow(delay, p) => {
                tokio::time::sleep(delay).await;
                Json(json!({ "cancellation_probability": p })).into_response()
            }
        }
    }

    async fn health(State(state): State<StubState>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "model_loaded": state.model_loaded,
            "static_folder": "/srv/dist",
            "static_folder_exists": true
        }))
    }

    /// Start a stub service that answers every prediction with `reply`.
    pub async fn spawn_stub_service(reply: StubReply) -> StubService {
        spawn_stub_service_with_model(reply, true).await
    }

    pub async fn spawn_stub_service_with_model(reply: StubReply, model_loaded: bool) -> StubService {
        let tracing_guard = init_test_tracing();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            model_loaded,
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/predict", post(predict))
            .route("/health", get(health))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub service");
        let address = listener.local_addr().expect("Stub service has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub service failed");
        });

        StubService {
            base_url: format!("http://{}", address),
            requests,
            server,
            _tracing: tracing_guard,
        }
    }

    /// A base URL on which nothing is listening.
    pub async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind placeholder listener");
        let address = listener.local_addr().expect("Placeholder listener has no address");
        drop(listener);
        format!("http://{}", address)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn tracing_installed() -> bool {
            tracing::dispatcher::get_default(|dispatch| {
                !dispatch.is::<tracing::subscriber::NoSubscriber>()
            })
        }

        #[tokio::test]
        async fn test_stub_service_keeps_tracing_installed() {
            let stub = spawn_stub_service(StubReply::Probability(10.0)).await;
            assert!(tracing_installed());
            assert!(stub.requests().is_empty());
        }
    }
}
