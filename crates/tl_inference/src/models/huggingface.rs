use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tl_core::{ComputeDevice, Error, InferenceModel, InferenceRequest, ModelLoader, Precision, Result};
use url::Url;

use crate::InferenceConfig;

pub const DEFAULT_HF_ENDPOINT: &str = "https://api-inference.huggingface.co";

#[derive(Serialize)]
struct SummarizationPayload<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
    options: PayloadOptions,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
    temperature: f32,
    truncation: bool,
}

#[derive(Serialize)]
struct PayloadOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
struct HfClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HfClient {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Pulls the service's `{"error": ...}` message out of a failed response.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    format!("status {}: {}", status.as_u16(), detail)
}

/// Summarization model served by a Hugging Face style inference endpoint.
pub struct HuggingFaceModel {
    client: HfClient,
    model_id: String,
    device: ComputeDevice,
    precision: Precision,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.client.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.client.base_url)
            .field("model_id", &self.model_id)
            .field("device", &self.device)
            .field("precision", &self.precision)
            .finish()
    }
}

#[async_trait::async_trait]
impl InferenceModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn infer(&self, request: &InferenceRequest) -> Result<String> {
        let payload = SummarizationPayload {
            inputs: &request.text,
            parameters: GenerationParameters {
                max_length: request.max_length,
                min_length: request.min_length,
                do_sample: request.do_sample,
                temperature: request.temperature,
                truncation: request.truncation,
            },
            options: PayloadOptions { wait_for_model: true },
        };

        let response = self
            .client
            .authorize(
                self.client
                    .http
                    .post(format!("{}/models/{}", self.client.base_url, self.model_id)),
            )
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Inference(error_message(response).await));
        }

        let outputs = response.json::<Vec<SummaryOutput>>().await?;
        let summary = outputs
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference(format!("{} returned no summary", self.model_id)))?;
        tracing::debug!("Generated summary with {}: {}", self.model_id, summary.summary_text);
        Ok(summary.summary_text)
    }
}

pub struct HuggingFaceLoader {
    client: HfClient,
}

impl fmt::Debug for HuggingFaceLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceLoader")
            .field("base_url", &self.client.base_url)
            .finish()
    }
}

impl HuggingFaceLoader {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_HF_ENDPOINT);
        let base_url = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("Invalid inference endpoint {}: {}", endpoint, e)))?;
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client: HfClient {
                http,
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            },
        })
    }
}

#[async_trait::async_trait]
impl ModelLoader for HuggingFaceLoader {
    async fn load(
        &self,
        model_id: &str,
        device: ComputeDevice,
        precision: Precision,
    ) -> Result<Arc<dyn InferenceModel>> {
        if model_id.trim().is_empty() || model_id.contains(char::is_whitespace) {
            return Err(Error::ModelLoad(format!("Invalid model identifier: {:?}", model_id)));
        }

        let response = self
            .client
            .authorize(
                self.client
                    .http
                    .get(format!("{}/status/{}", self.client.base_url, model_id)),
            )
            .send()
            .await
            .map_err(|e| Error::External(anyhow!("Inference endpoint unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ModelLoad(format!(
                "{} is not available ({})",
                model_id,
                error_message(response).await
            )));
        }

        tracing::debug!("{} available at {} for {} ({})", model_id, self.client.base_url, device, precision);
        Ok(Arc::new(HuggingFaceModel {
            client: self.client.clone(),
            model_id: model_id.to_string(),
            device,
            precision,
        }))
    }
}
