use std::time::Duration;

use tl_core::ComputeDevice;

pub mod device;
pub mod evaluation;
pub mod models;
pub mod presets;
pub mod summarizer;

pub use models::{create_loader, BackendKind};
pub use summarizer::TextSummarizer;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Connection settings shared by the remote adapters.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference service; each adapter has its own default.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub backend: BackendKind,
    /// Preset key or raw model identifier; the recommended preset when unset.
    pub model_name: Option<String>,
    /// Skips probing when set.
    pub device: Option<ComputeDevice>,
    pub inference_config: InferenceConfig,
}

/// Builds a summarizer for `config` using the configured backend.
pub async fn load_summarizer(config: &Config) -> tl_core::Result<TextSummarizer> {
    let loader = create_loader(config)?;
    let model_id = presets::resolve_model(config.model_name.as_deref());
    let probe = device::probe_for(config.device);
    TextSummarizer::load(&model_id, loader.as_ref(), probe.as_ref()).await
}

pub mod prelude {
    pub use super::models::create_loader;
    pub use super::summarizer::TextSummarizer;
    pub use super::{load_summarizer, BackendKind, Config, InferenceConfig};
    pub use tl_core::{
        ComputeDevice, Error, Result, SummarizationRequest, SummarizationResult, SummaryMetadata,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::SummarizationRequest;

    #[tokio::test]
    async fn test_inference_pipeline_with_dummy_backend() {
        let config = Config {
            backend: BackendKind::Dummy,
            model_name: Some("bart-large".to_string()),
            device: Some(ComputeDevice::Cpu),
            inference_config: InferenceConfig::default(),
        };
        let summarizer = load_summarizer(&config).await.unwrap();
        assert_eq!(summarizer.model_identifier(), "facebook/bart-large-cnn");
        assert_eq!(summarizer.device(), ComputeDevice::Cpu);

        let text = "The committee met on Monday to review the annual budget. ".repeat(8);
        let result = summarizer
            .summarize(&SummarizationRequest::new(text).with_lengths(10, 50))
            .await;
        assert!(result.is_success(), "{:?}", result);
        assert_eq!(result.metadata().unwrap().original_word_count, 80);
    }
}
