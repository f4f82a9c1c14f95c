use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tl_core::{ComputeDevice, Error, InferenceModel, InferenceRequest, ModelLoader, Precision, Result};
use url::Url;

use crate::InferenceConfig;

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Serialize)]
struct ShowRequest<'a> {
    name: &'a str,
}

fn build_prompt(request: &InferenceRequest) -> String {
    format!(
        "Summarize the following text in plain prose, between {} and {} words. \
         Reply with the summary only.\n\n{}",
        request.min_length, request.max_length, request.text
    )
}

/// Summarization through a model served by a local Ollama runtime.
pub struct OllamaModel {
    http: Client,
    base_url: String,
    model_name: String,
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait::async_trait]
impl InferenceModel for OllamaModel {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn infer(&self, request: &InferenceRequest) -> Result<String> {
        // Ollama decodes greedily at temperature 0.
        let temperature = if request.do_sample { request.temperature } else { 0.0 };
        let body = GenerateRequest {
            model: &self.model_name,
            prompt: build_prompt(request),
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict: request.max_length,
            },
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Inference(format!("status {}: {}", status.as_u16(), body)));
        }

        let generated = response.json::<GenerateResponse>().await?;
        Ok(generated.response.trim().to_string())
    }
}

pub struct OllamaLoader {
    http: Client,
    base_url: String,
}

impl fmt::Debug for OllamaLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaLoader")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OllamaLoader {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_OLLAMA_ENDPOINT);
        let base_url = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("Invalid Ollama endpoint {}: {}", endpoint, e)))?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ModelLoader for OllamaLoader {
    async fn load(
        &self,
        model_id: &str,
        device: ComputeDevice,
        precision: Precision,
    ) -> Result<Arc<dyn InferenceModel>> {
        // The runtime places layers itself; device and precision are advisory here.
        tracing::debug!("Requesting {} from Ollama ({} / {})", model_id, device, precision);

        let response = self
            .http
            .post(format!("{}/api/show", self.base_url))
            .json(&ShowRequest { name: model_id })
            .send()
            .await
            .map_err(|e| {
                Error::External(anyhow!(
                    "Ollama is not available at {}: {}. Please ensure Ollama is running.",
                    self.base_url,
                    e
                ))
            })?;

        if !response.status().is_success() {
            return Err(Error::ModelLoad(format!(
                "Model '{}' is not installed in Ollama (status {})",
                model_id,
                response.status().as_u16()
            )));
        }

        Ok(Arc::new(OllamaModel {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            model_name: model_id.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn show(Json(body): Json<Value>) -> StatusCode {
        if body["name"] == "llama3.2" {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }

    async fn generate(Json(body): Json<Value>) -> Json<Value> {
        let reply = format!(
            "  {} temperature {} num_predict {} stream {}\n",
            body["model"].as_str().unwrap_or_default(),
            body["options"]["temperature"],
            body["options"]["num_predict"],
            body["stream"],
        );
        Json(json!({ "model": body["model"], "response": reply, "done": true }))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/show", post(show))
            .route("/api/generate", post(generate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn loader_for(endpoint: String) -> OllamaLoader {
        OllamaLoader::new(&InferenceConfig {
            endpoint: Some(endpoint),
            ..InferenceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_prompt_mentions_bounds() {
        let prompt = build_prompt(&InferenceRequest {
            text: "Body text.".to_string(),
            max_length: 90,
            min_length: 15,
            do_sample: false,
            temperature: 1.0,
            truncation: true,
        });
        assert!(prompt.contains("between 15 and 90 words"));
        assert!(prompt.ends_with("Body text."));
    }

    #[tokio::test]
    async fn test_load_and_generate() {
        let loader = loader_for(spawn_server().await);
        let model = loader
            .load("llama3.2", ComputeDevice::Cpu, Precision::Full)
            .await
            .unwrap();

        let request = InferenceRequest {
            text: "Body text.".to_string(),
            max_length: 90,
            min_length: 15,
            do_sample: false,
            temperature: 1.0,
            truncation: true,
        };
        let summary = model.infer(&request).await.unwrap();
        assert_eq!(summary, "llama3.2 temperature 0.0 num_predict 90 stream false");

        let sampled = InferenceRequest {
            do_sample: true,
            temperature: 0.5,
            ..request
        };
        let summary = model.infer(&sampled).await.unwrap();
        assert!(summary.contains("temperature 0.5"));
    }

    #[tokio::test]
    async fn test_missing_model_fails_to_load() {
        let loader = loader_for(spawn_server().await);
        let err = loader
            .load("mistral", ComputeDevice::Cpu, Precision::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[tokio::test]
    async fn test_unreachable_runtime() {
        // Port 9 (discard) is not expected to serve HTTP.
        let loader = loader_for("http://127.0.0.1:9".to_string());
        let err = loader
            .load("llama3.2", ComputeDevice::Cpu, Precision::Full)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Ollama is not available"));
    }
}
