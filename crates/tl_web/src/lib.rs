use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/models", get(handlers::list_models))
        .route("/api/model", get(handlers::get_model).post(handlers::load_model))
        .route("/api/summarize", post(handlers::summarize))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use tl_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tl_core::{
        ComputeDevice, Error, InferenceModel, InferenceRequest, ModelLoader, Precision,
    };
    use tower::ServiceExt;

    #[derive(Debug)]
    struct EchoModel;

    #[async_trait::async_trait]
    impl InferenceModel for EchoModel {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn infer(&self, _request: &InferenceRequest) -> tl_core::Result<String> {
            Ok("short summary".to_string())
        }
    }

    struct OnlyFallbackLoader {
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ModelLoader for OnlyFallbackLoader {
        async fn load(
            &self,
            model_id: &str,
            _device: ComputeDevice,
            _precision: Precision,
        ) -> tl_core::Result<Arc<dyn InferenceModel>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if model_id == "t5-small" {
                Ok(Arc::new(EchoModel))
            } else {
                Err(Error::ModelLoad(format!("{} unavailable", model_id)))
            }
        }
    }

    fn app_with(loader: Arc<OnlyFallbackLoader>) -> Router {
        create_app(AppState::new(loader, Some(ComputeDevice::Cpu)))
    }

    fn app() -> Router {
        app_with(Arc::new(OnlyFallbackLoader { loads: AtomicUsize::new(0) }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_list_models() {
        let (status, body) = send(&app(), "GET", "/api/models", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["label"], "DistilBART (Recommended)");
    }

    #[tokio::test]
    async fn test_summarize_requires_loaded_model() {
        let app = app();
        let text = "word ".repeat(60);
        let (status, body) = send(&app, "POST", "/api/summarize", Some(json!({ "text": text }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Please load a model first.");

        let (status, body) = send(&app, "GET", "/api/model", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loaded"], false);
    }

    #[tokio::test]
    async fn test_blank_text_is_a_bad_request() {
        let (status, _) = send(&app(), "POST", "/api/summarize", Some(json!({ "text": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_load_then_summarize() {
        let loader = Arc::new(OnlyFallbackLoader { loads: AtomicUsize::new(0) });
        let app = app_with(loader.clone());
        let (status, body) =
            send(&app, "POST", "/api/model", Some(json!({ "model": "bart-large" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
        assert_eq!(body["loaded"], true);
        assert_eq!(body["model"], "t5-small");
        assert_eq!(body["requested_model"], "facebook/bart-large-cnn");
        assert_eq!(body["device"], "cpu");
        assert_eq!(body["precision"], "full");

        let text = "word ".repeat(60);
        let (status, body) = send(
            &app,
            "POST",
            "/api/summarize",
            Some(json!({ "text": text, "max_length": 100, "min_length": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["summary"], "short summary");
        assert_eq!(body["metadata"]["original_word_count"], 60);
        assert_eq!(body["metadata"]["summary_word_count"], 2);
        assert_eq!(body["metadata"]["model_used"], "t5-small");
    }

    #[tokio::test]
    async fn test_out_of_range_settings_are_a_bad_request() {
        let app = app();
        send(&app, "POST", "/api/model", Some(json!({ "model": "t5-small" }))).await;

        let text = "word ".repeat(60);
        let (status, body) = send(
            &app,
            "POST",
            "/api/summarize",
            Some(json!({
                "text": text,
                "max_length": 0,
                "min_length": 0,
                "sample": true,
                "temperature": -7.5
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "max_length must be between 50 and 300.");

        let (status, body) = send(
            &app,
            "POST",
            "/api/summarize",
            Some(json!({ "text": text, "sample": true, "temperature": 3.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "temperature must be between 0.1 and 2.0.");
    }

    #[tokio::test]
    async fn test_rejected_input_is_reported_as_failure() {
        let state = AppState::new(
            Arc::new(OnlyFallbackLoader { loads: AtomicUsize::new(0) }),
            Some(ComputeDevice::Cpu),
        )
        .with_summarizer(tl_inference::TextSummarizer::from_model(
            "echo",
            Arc::new(EchoModel),
            ComputeDevice::Cpu,
        ));
        let app = create_app(state);

        let (status, body) =
            send(&app, "POST", "/api/summarize", Some(json!({ "text": "short text" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failure");
        assert!(body["error"].as_str().unwrap().contains("too short"));
    }
}
