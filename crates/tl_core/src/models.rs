use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::types::{ComputeDevice, Precision};
use crate::Result;

/// Generation parameters handed to an inference capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub text: String,
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
    pub temperature: f32,
    /// The engine may cut input that exceeds its own token budget.
    pub truncation: bool,
}

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Short adapter name used in logs
    fn name(&self) -> &str;

    /// Produce a summary of `request.text`
    async fn infer(&self, request: &InferenceRequest) -> Result<String>;
}

/// Acquires an inference capability bound to a model, device and precision.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(
        &self,
        model_id: &str,
        device: ComputeDevice,
        precision: Precision,
    ) -> Result<Arc<dyn InferenceModel>>;
}
