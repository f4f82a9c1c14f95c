use std::fmt;
use std::sync::Arc;

use tl_core::{ComputeDevice, Error, InferenceModel, InferenceRequest, ModelLoader, Precision, Result};

/// Extractive stand-in that keeps leading sentences. `min_length` and
/// `max_length` are read as word bounds.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn infer(&self, request: &InferenceRequest) -> Result<String> {
        if request.text.trim().is_empty() {
            return Err(Error::Inference("Nothing to summarize".to_string()));
        }

        // Take whole sentences until min_length words are covered.
        let mut words: Vec<&str> = Vec::new();
        for sentence in request.text.split_inclusive(|c: char| matches!(c, '.' | '!' | '?')) {
            words.extend(sentence.split_whitespace());
            if words.len() >= request.min_length {
                break;
            }
        }
        words.truncate(request.max_length.max(1));
        Ok(words.join(" "))
    }
}

/// Hands out a [`DummyModel`] for any identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyLoader;

#[async_trait::async_trait]
impl ModelLoader for DummyLoader {
    async fn load(
        &self,
        model_id: &str,
        device: ComputeDevice,
        precision: Precision,
    ) -> Result<Arc<dyn InferenceModel>> {
        tracing::debug!("Dummy model standing in for {} on {} ({})", model_id, device, precision);
        Ok(Arc::new(DummyModel::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, min_length: usize, max_length: usize) -> InferenceRequest {
        InferenceRequest {
            text: text.to_string(),
            max_length,
            min_length,
            do_sample: false,
            temperature: 1.0,
            truncation: true,
        }
    }

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let text = "This is a test article. It has multiple sentences. This is the third sentence.";

        let summary = model.infer(&request(text, 3, 50)).await.unwrap();
        assert_eq!(summary, "This is a test article.");

        let summary = model.infer(&request(text, 8, 50)).await.unwrap();
        assert_eq!(summary, "This is a test article. It has multiple sentences.");

        let summary = model.infer(&request(text, 8, 6)).await.unwrap();
        assert_eq!(summary, "This is a test article. It");
    }

    #[tokio::test]
    async fn test_dummy_model_without_sentence_breaks() {
        let model = DummyModel::new();
        let summary = model.infer(&request("one two three four five", 2, 3)).await.unwrap();
        assert_eq!(summary, "one two three");
    }

    #[tokio::test]
    async fn test_dummy_model_rejects_blank_text() {
        let model = DummyModel::new();
        assert!(model.infer(&request("  ", 1, 10)).await.is_err());
    }

    #[tokio::test]
    async fn test_dummy_loader_accepts_any_model() {
        let model = DummyLoader
            .load("anything/at-all", ComputeDevice::Cpu, Precision::Full)
            .await
            .unwrap();
        assert_eq!(model.name(), "Dummy");
    }
}
